//! Client and server helpers for the Synology Chat webhook API.
//!
//! Synology Chat integrations come in two flavors, named from the chat
//! server's point of view:
//!
//! - **Incoming webhooks** deliver messages *into* a channel. The
//!   [`IncomingWebhook`] client builds the `payload=` form body and posts
//!   it to the DSM web API.
//! - **Slash commands** and **outgoing webhooks** deliver messages *out*
//!   of the chat server to your HTTP handler. [`SlashCommand`] parses
//!   command parameters, [`OutgoingWebhookEvent`] wraps trigger-word
//!   notifications, and both authenticate the inbound token and build the
//!   JSON reply.
//!
//! The two pipelines are independent and stateless per request; they share
//! only the [`SynoChatError`] taxonomy.
//!
//! # Sending a message
//!
//! ```ignore
//! use synochat::IncomingWebhook;
//!
//! let webhook = IncomingWebhook::new("nas.example.com", "token-from-chat");
//! webhook.send("Backup finished", None).await?;
//! ```
//!
//! # Handling a slash command
//!
//! ```ignore
//! use synochat::SlashCommand;
//!
//! let mut command = SlashCommand::from_form(&body, "configured-token")?;
//! if !command.is_authentic() {
//!     let (body, status) = command.invalid_token_response();
//!     return http_reply(status, body);
//! }
//! let env = command.add_positional_parameter("env")?;
//! let delay = command.add_optional_parameter("delay");
//! let reply = command.create_response("deploying", None)?;
//! ```

pub mod command;
pub mod error;
pub mod events;
pub mod types;
pub mod webhook;

pub use command::{AcceptedValues, Parameter, SlashCommand};
pub use error::{Result, SynoChatError};
pub use events::OutgoingWebhookEvent;
pub use types::{CommandResponse, MessagePayload, OutgoingWebhookPayload, SlashCommandPayload};
pub use webhook::IncomingWebhook;

//! Outgoing-webhook events, posted by the chat server when a trigger word
//! fires in a channel.

use chrono::{DateTime, Utc};

use crate::error::{Result, SynoChatError};
use crate::types::{CommandResponse, OutgoingWebhookPayload};

/// A trigger-word notification from the chat server.
///
/// Unlike a slash command the message is free text with no declared
/// grammar, so there is nothing to parse. The event is read-only and
/// answers through the same authenticate-then-respond contract as
/// [`SlashCommand`](crate::command::SlashCommand).
#[derive(Debug, Clone)]
pub struct OutgoingWebhookEvent {
    client_token: String,
    server_token: String,
    channel_id: String,
    channel_type: String,
    channel_name: String,
    user_id: String,
    username: String,
    post_id: String,
    thread_id: String,
    timestamp: String,
    text: String,
    trigger_word: String,
}

impl OutgoingWebhookEvent {
    /// Wrap a decoded payload together with the locally configured token.
    pub fn new(payload: OutgoingWebhookPayload, token: impl Into<String>) -> Self {
        let event = Self {
            client_token: token.into(),
            server_token: payload.token,
            channel_id: payload.channel_id,
            channel_type: payload.channel_type,
            channel_name: payload.channel_name,
            user_id: payload.user_id,
            username: payload.username,
            post_id: payload.post_id,
            thread_id: payload.thread_id,
            timestamp: payload.timestamp,
            text: payload.text,
            trigger_word: payload.trigger_word,
        };
        tracing::debug!(
            "outgoing webhook fired by `{}` in {}: {}",
            event.trigger_word,
            event.channel_name,
            event.text
        );
        event
    }

    /// Decode a raw url-encoded form body and wrap it.
    pub fn from_form(body: &str, token: impl Into<String>) -> Result<Self> {
        let payload: OutgoingWebhookPayload = serde_urlencoded::from_str(body)
            .map_err(|err| SynoChatError::MalformedPayload(err.to_string()))?;
        Ok(Self::new(payload, token))
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    pub fn channel_type(&self) -> &str {
        &self.channel_type
    }

    pub fn channel_name(&self) -> &str {
        &self.channel_name
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    pub fn thread_id(&self) -> &str {
        &self.thread_id
    }

    /// The raw timestamp string as the server sent it.
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn trigger_word(&self) -> &str {
        &self.trigger_word
    }

    /// The event timestamp as a UTC datetime, when the raw string parses
    /// as epoch milliseconds.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .parse::<i64>()
            .ok()
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }

    /// Compare the locally configured token against the one the chat
    /// server sent. Exact, case-sensitive string equality.
    pub fn authenticate(&self) -> Result<()> {
        if self.client_token != self.server_token {
            tracing::warn!("outgoing webhook rejected: token mismatch");
            return Err(SynoChatError::InvalidToken);
        }
        Ok(())
    }

    /// Like [`authenticate`](OutgoingWebhookEvent::authenticate), as a
    /// plain bool.
    pub fn is_authentic(&self) -> bool {
        self.client_token == self.server_token
    }

    /// Build the JSON reply for this event, echoing the caller identity
    /// back to the chat server. Authenticates first.
    pub fn create_response(&self, text: &str, file_url: Option<&str>) -> Result<CommandResponse> {
        self.authenticate()?;
        Ok(CommandResponse {
            token: self.client_token.clone(),
            text: text.to_owned(),
            user_id: self.user_id.clone(),
            username: self.username.clone(),
            file_url: file_url.map(str::to_owned),
        })
    }

    /// The body and HTTP status to answer with when authentication fails.
    pub fn invalid_token_response(&self) -> (String, u16) {
        (serde_json::json!({"success": false}).to_string(), 403)
    }
}

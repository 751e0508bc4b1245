//! Error types for the Synology Chat webhook helpers.
//!
//! All fallible operations in this crate return [`Result<T>`], which uses
//! [`SynoChatError`] as the error type.

use thiserror::Error;

/// Errors that can occur while sending to or receiving from Synology Chat.
///
/// The `Invalid*` variants correspond to the documented error codes in the
/// chat server's response envelope; anything the server reports outside that
/// set surfaces as [`SynoChatError::UnknownApi`] with the raw response body.
#[derive(Error, Debug)]
pub enum SynoChatError {
    /// Token authentication failed, either locally against an inbound
    /// webhook or remotely with error code 404.
    #[error("authentication failed due to use of an invalid token")]
    InvalidToken,

    /// The server rejected the API identifier (error code 102).
    #[error("request failed due to use of an invalid API identifier")]
    InvalidApi,

    /// The server rejected the API method (error code 103).
    #[error("request failed due to use of an unsupported method")]
    InvalidMethod,

    /// The server rejected the API version (error code 104).
    #[error("request failed due to use of an unsupported version")]
    InvalidVersion,

    /// The server rejected the message payload (error code 117).
    #[error("request failed due to use of an invalid message payload")]
    InvalidPayload,

    /// The server reported failure with an undocumented or missing error
    /// code. Carries the raw response body for inspection.
    #[error("unknown API error: {0}")]
    UnknownApi(String),

    /// A required slash-command parameter was not present in the command
    /// text.
    #[error("missing required parameter `{0}`")]
    MissingParameter(String),

    /// The server answered with an HTTP status other than 200 instead of
    /// the usual JSON envelope.
    #[error("unexpected HTTP status {status}: {body}")]
    Transport {
        /// The HTTP status code of the response.
        status: u16,
        /// The raw response body.
        body: String,
    },

    /// The server answered 200 OK but the body was not a recognizable
    /// response envelope.
    #[error("malformed API response: {0}")]
    MalformedResponse(String),

    /// An inbound form body could not be decoded into a webhook payload.
    #[error("malformed webhook payload: {0}")]
    MalformedPayload(String),

    /// An HTTP-level error from reqwest.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A convenience type alias for operations in this crate.
pub type Result<T> = std::result::Result<T, SynoChatError>;

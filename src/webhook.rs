//! Outbound client for Synology Chat incoming webhooks.
//!
//! An "incoming" webhook is incoming from the chat server's point of view:
//! this side builds the message and POSTs it to the server's web API, which
//! routes it to the channel associated with the token.

use reqwest::StatusCode;

use crate::error::{Result, SynoChatError};
use crate::types::{ApiResponse, MessagePayload};

const API: &str = "SYNO.Chat.External";
const METHOD: &str = "incoming";
const DEFAULT_VERSION: &str = "2";

/// Ports on which DSM serves plain HTTP.
const PLAIN_HTTP_PORTS: [u16; 2] = [80, 5000];

/// A client bound to one incoming-webhook integration.
///
/// Defaults to HTTPS on port 443 with certificate verification enabled.
/// Self-signed DSM installations can opt out with
/// [`with_verify_ssl`](IncomingWebhook::with_verify_ssl).
#[derive(Debug, Clone)]
pub struct IncomingWebhook {
    hostname: String,
    port: u16,
    token: String,
    use_https: bool,
    verify_ssl: bool,
    version: String,
}

impl IncomingWebhook {
    /// Create a client for the given DSM hostname and integration token.
    pub fn new(hostname: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            port: 443,
            token: token.into(),
            use_https: true,
            verify_ssl: true,
            version: DEFAULT_VERSION.to_owned(),
        }
    }

    /// Change the port. Ports 80 and 5000 switch the scheme to plain HTTP;
    /// any other port switches it back to HTTPS. Call
    /// [`with_https`](IncomingWebhook::with_https) afterwards to override.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self.use_https = !PLAIN_HTTP_PORTS.contains(&port);
        self
    }

    /// Force the scheme regardless of the port.
    pub fn with_https(mut self, use_https: bool) -> Self {
        self.use_https = use_https;
        self
    }

    /// Toggle TLS certificate verification.
    pub fn with_verify_ssl(mut self, verify_ssl: bool) -> Self {
        self.verify_ssl = verify_ssl;
        self
    }

    /// Override the API version sent in the query string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn use_https(&self) -> bool {
        self.use_https
    }

    pub fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    /// The API identifier sent in the query string.
    pub fn api(&self) -> &str {
        API
    }

    /// The API method sent in the query string.
    pub fn method(&self) -> &str {
        METHOD
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The entry.cgi URL this client posts to, without the query string.
    pub fn endpoint(&self) -> String {
        let scheme = if self.use_https { "https" } else { "http" };
        format!("{}://{}:{}/webapi/entry.cgi", scheme, self.hostname, self.port)
    }

    /// Post a text message, with an optional file URL for the server to
    /// fetch and attach.
    ///
    /// The message travels as `payload=<json>` in a url-encoded form body,
    /// with the API identifier, method, version and token in the query
    /// string.
    pub async fn send(&self, text: &str, file_url: Option<&str>) -> Result<()> {
        let payload = MessagePayload {
            text: text.to_owned(),
            file_url: file_url.map(str::to_owned),
        };
        let body = serde_json::to_string(&payload)?;
        let url = self.endpoint();

        tracing::debug!("sending incoming-webhook message to {}", url);

        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(!self.verify_ssl)
            .build()?;

        let response = client
            .post(&url)
            .query(&[
                ("api", API),
                ("method", METHOD),
                ("version", self.version.as_str()),
                ("token", self.token.as_str()),
            ])
            .form(&[("payload", body.as_str())])
            .send()
            .await?;

        let status = response.status();
        let raw = response.text().await?;
        check_response(status, &raw)
    }
}

/// Map a raw HTTP response onto the crate's error taxonomy.
///
/// The envelope is only ever read from a 200; any other status, 2xx
/// included, is reported as a transport error with the body attached. A
/// 200 with `success: true` is the only accepted outcome; every documented
/// error code gets its own variant and anything else falls through to
/// [`SynoChatError::UnknownApi`].
pub(crate) fn check_response(status: StatusCode, body: &str) -> Result<()> {
    if status != StatusCode::OK {
        tracing::warn!(
            status = status.as_u16(),
            body = %body,
            "chat server answered with an unexpected HTTP status"
        );
        return Err(SynoChatError::Transport {
            status: status.as_u16(),
            body: body.to_owned(),
        });
    }

    let response: ApiResponse = serde_json::from_str(body)
        .map_err(|err| SynoChatError::MalformedResponse(err.to_string()))?;

    if response.success {
        tracing::debug!("chat server accepted the message");
        return Ok(());
    }

    let (code, detail) = match response.error {
        Some(error) => (
            error.code,
            error.errors.unwrap_or_else(|| "unknown error".to_owned()),
        ),
        None => (None, "unknown error".to_owned()),
    };

    tracing::warn!(code = ?code, errors = %detail, "chat server rejected the message");

    Err(match code {
        Some(102) => SynoChatError::InvalidApi,
        Some(103) => SynoChatError::InvalidMethod,
        Some(104) => SynoChatError::InvalidVersion,
        Some(117) => SynoChatError::InvalidPayload,
        Some(404) => SynoChatError::InvalidToken,
        _ => SynoChatError::UnknownApi(body.to_owned()),
    })
}

//! Wire types shared by the incoming and outgoing webhook pipelines.

use serde::{Deserialize, Serialize};

/// Form payload posted by the chat server when a slash command fires.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SlashCommandPayload {
    pub token: String,
    pub user_id: String,
    pub username: String,
    pub text: String,
}

/// Form payload posted by the chat server when a trigger word fires an
/// outgoing webhook.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutgoingWebhookPayload {
    pub token: String,
    pub channel_id: String,
    pub channel_type: String,
    pub channel_name: String,
    pub user_id: String,
    pub username: String,
    pub post_id: String,
    pub thread_id: String,
    /// Epoch milliseconds, kept verbatim as the server sends them.
    pub timestamp: String,
    pub text: String,
    pub trigger_word: String,
}

/// JSON body of an incoming-webhook message, sent url-encoded under the
/// `payload` form key.
#[derive(Debug, Clone, Serialize)]
pub struct MessagePayload {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

/// Response envelope returned by the chat server's web API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// Error object nested in a failed [`ApiResponse`].
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub errors: Option<String>,
}

/// JSON reply a slash-command handler returns to the chat server.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse {
    pub token: String,
    pub text: String,
    pub user_id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_command_payload_from_form() {
        let body = "token=abc123&user_id=42&username=jane&text=%2Fstatus+all";
        let payload: SlashCommandPayload = serde_urlencoded::from_str(body).unwrap();
        assert_eq!(payload.token, "abc123");
        assert_eq!(payload.user_id, "42");
        assert_eq!(payload.username, "jane");
        assert_eq!(payload.text, "/status all");
    }

    #[test]
    fn slash_command_payload_ignores_unknown_keys() {
        let body = "token=abc&user_id=1&username=bob&text=%2Fx&post_id=7";
        let payload: SlashCommandPayload = serde_urlencoded::from_str(body).unwrap();
        assert_eq!(payload.text, "/x");
    }

    #[test]
    fn outgoing_webhook_payload_from_form() {
        let body = "token=tok&channel_id=33&channel_type=1&channel_name=general\
                    &user_id=42&username=jane&post_id=100&thread_id=0\
                    &timestamp=1625763393000&text=hello+bot&trigger_word=hello";
        let payload: OutgoingWebhookPayload = serde_urlencoded::from_str(body).unwrap();
        assert_eq!(payload.channel_name, "general");
        assert_eq!(payload.timestamp, "1625763393000");
        assert_eq!(payload.trigger_word, "hello");
    }

    #[test]
    fn message_payload_without_file_url() {
        let payload = MessagePayload {
            text: "hi".into(),
            file_url: None,
        };
        assert_eq!(serde_json::to_string(&payload).unwrap(), r#"{"text":"hi"}"#);
    }

    #[test]
    fn message_payload_with_file_url() {
        let payload = MessagePayload {
            text: "hi".into(),
            file_url: Some("https://example.com/cat.png".into()),
        };
        assert_eq!(
            serde_json::to_string(&payload).unwrap(),
            r#"{"text":"hi","file_url":"https://example.com/cat.png"}"#
        );
    }

    #[test]
    fn api_response_success() {
        let response: ApiResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(response.success);
        assert!(response.error.is_none());
    }

    #[test]
    fn api_response_with_error_body() {
        let body = r#"{"success":false,"error":{"code":404,"errors":"invalid token"}}"#;
        let response: ApiResponse = serde_json::from_str(body).unwrap();
        assert!(!response.success);
        let error = response.error.unwrap();
        assert_eq!(error.code, Some(404));
        assert_eq!(error.errors.as_deref(), Some("invalid token"));
    }

    #[test]
    fn api_error_body_without_code() {
        let body = r#"{"success":false,"error":{"errors":"oops"}}"#;
        let response: ApiResponse = serde_json::from_str(body).unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, None);
        assert_eq!(error.errors.as_deref(), Some("oops"));
    }

    #[test]
    fn command_response_field_order() {
        let response = CommandResponse {
            token: "tok".into(),
            text: "done".into(),
            user_id: "42".into(),
            username: "jane".into(),
            file_url: None,
        };
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"token":"tok","text":"done","user_id":"42","username":"jane"}"#
        );
    }

    #[test]
    fn command_response_with_file_url() {
        let response = CommandResponse {
            token: "tok".into(),
            text: "done".into(),
            user_id: "42".into(),
            username: "jane".into(),
            file_url: Some("https://example.com/report.pdf".into()),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.ends_with(r#""file_url":"https://example.com/report.pdf"}"#));
    }
}

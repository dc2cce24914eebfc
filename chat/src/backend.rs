//! Seam between chat orchestration and the HTTP transport.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser client implements [`ChatBackend`] over `gloo-net`, the
//! terminal client over `reqwest`, and tests over in-memory fakes. All of
//! them share the endpoint paths and error-body handling defined here.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`ApiError::Status`] with the server's `detail`
//! message when it sent one. Cancellation is reported as
//! [`ApiError::Aborted`] and never shown to the user.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use async_trait::async_trait;
use events::TransportError;
use futures_util::stream::LocalBoxStream;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{DatabaseInfo, Session, SessionDetail};

/// Response body of an open chat stream.
pub type ByteStream = LocalBoxStream<'static, Result<Vec<u8>, TransportError>>;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("{detail} (HTTP {status})")]
    Status { status: u16, detail: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("request aborted")]
    Aborted,
}

impl ApiError {
    /// Build a status error from a failed response.
    #[must_use]
    pub fn from_response(status: u16, status_text: &str, body: &str) -> Self {
        Self::Status { status, detail: error_detail(status_text, body) }
    }

    /// Message suitable for the transcript or a notice.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { detail, .. } => detail.clone(),
            Self::Transport(message) | Self::Decode(message) => message.clone(),
            Self::Aborted => "request aborted".to_owned(),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Aborted => Self::Aborted,
            TransportError::Failed(message) => Self::Transport(message),
        }
    }
}

/// Human-readable reason for a failed request: the `detail` field of a JSON
/// error body, else the HTTP status text, else a generic message.
#[must_use]
pub fn error_detail(status_text: &str, body: &str) -> String {
    #[derive(Deserialize)]
    struct Envelope {
        #[serde(default)]
        detail: Value,
    }

    match serde_json::from_str::<Envelope>(body).map(|envelope| envelope.detail) {
        Ok(Value::String(detail)) if !detail.trim().is_empty() => detail,
        Ok(Value::Null | Value::String(_)) | Err(_) => {
            let status_text = status_text.trim();
            if status_text.is_empty() {
                "request failed".to_owned()
            } else {
                status_text.to_owned()
            }
        }
        Ok(other) => other.to_string(),
    }
}

// =============================================================================
// ENDPOINTS
// =============================================================================

pub const SESSIONS_PATH: &str = "/api/sessions";
pub const TABLES_PATH: &str = "/api/database/tables";

#[must_use]
pub fn session_path(session_id: &str) -> String {
    format!("{SESSIONS_PATH}/{session_id}")
}

#[must_use]
pub fn chat_path(session_id: &str) -> String {
    format!("/api/chat/{session_id}")
}

/// Body of `POST /api/sessions`.
#[derive(Clone, Debug, Serialize)]
pub struct NewSession<'a> {
    pub title: &'a str,
}

/// Body of `POST /api/chat/{session_id}`.
#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

// =============================================================================
// BACKEND
// =============================================================================

/// Operations the chat UI needs from the server.
#[async_trait(?Send)]
pub trait ChatBackend {
    async fn list_sessions(&self) -> Result<Vec<Session>, ApiError>;

    async fn create_session(&self, title: &str) -> Result<Session, ApiError>;

    async fn session_detail(&self, session_id: &str) -> Result<SessionDetail, ApiError>;

    async fn delete_session(&self, session_id: &str) -> Result<(), ApiError>;

    async fn list_tables(&self) -> Result<DatabaseInfo, ApiError>;

    /// Open the event stream for one question. A non-2xx answer is an
    /// error here; failures after the body starts arrive through the stream.
    async fn open_chat(&self, session_id: &str, message: &str) -> Result<ByteStream, ApiError>;
}

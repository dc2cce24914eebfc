//! `ChatBackend` over `reqwest`.
//!
//! ERROR HANDLING
//! ==============
//! Connection failures map to `ApiError::Transport`, non-2xx answers to
//! `ApiError::Status` with the server's `detail`, and undecodable bodies to
//! `ApiError::Decode`. Body read failures after a chat stream opens surface
//! as `TransportError::Failed` items on the stream.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use async_trait::async_trait;
use chat::backend::{ChatRequest, NewSession, SESSIONS_PATH, TABLES_PATH, chat_path, session_path};
use chat::{ApiError, ByteStream, ChatBackend, DatabaseInfo, Session, SessionDetail};
use events::TransportError;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;

use crate::CliError;
use crate::config::CliConfig;

pub struct ReqwestBackend {
    http: reqwest::Client,
    config: CliConfig,
}

impl ReqwestBackend {
    /// # Errors
    ///
    /// Returns [`CliError::HttpClient`] when the TLS backend fails to build.
    pub fn new(config: CliConfig) -> Result<Self, CliError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(CliError::HttpClient)?;
        Ok(Self { http, config })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::from_response(status.as_u16(), status.canonical_reason().unwrap_or(""), &body))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: reqwest::RequestBuilder) -> Result<T, ApiError> {
        let request = request.timeout(self.config.request_timeout);
        let text = self
            .send(request)
            .await?
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        decode_body(&text)
    }
}

/// Decode a 2xx JSON body.
fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl ChatBackend for ReqwestBackend {
    async fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
        self.send_json(self.http.get(self.config.url(SESSIONS_PATH))).await
    }

    async fn create_session(&self, title: &str) -> Result<Session, ApiError> {
        let request = self.http.post(self.config.url(SESSIONS_PATH)).json(&NewSession { title });
        self.send_json(request).await
    }

    async fn session_detail(&self, session_id: &str) -> Result<SessionDetail, ApiError> {
        self.send_json(self.http.get(self.config.url(&session_path(session_id)))).await
    }

    async fn delete_session(&self, session_id: &str) -> Result<(), ApiError> {
        let request = self
            .http
            .delete(self.config.url(&session_path(session_id)))
            .timeout(self.config.request_timeout);
        self.send(request).await?;
        Ok(())
    }

    async fn list_tables(&self) -> Result<DatabaseInfo, ApiError> {
        self.send_json(self.http.get(self.config.url(TABLES_PATH))).await
    }

    async fn open_chat(&self, session_id: &str, message: &str) -> Result<ByteStream, ApiError> {
        let request = self
            .http
            .post(self.config.url(&chat_path(session_id)))
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .json(&ChatRequest { message });
        let response = self.send(request).await?;
        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map(|bytes| bytes.to_vec()).map_err(|e| TransportError::Failed(e.to_string())))
            .boxed_local())
    }
}

//! REST calls to the chat backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side / native: stubs returning an error since these endpoints are
//! only reachable from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses are turned into `ApiError::Status` with the backend's
//! `detail` message; an aborted fetch becomes `ApiError::Aborted`.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use chat::backend::ByteStream;
#[cfg(feature = "hydrate")]
use chat::backend::{NewSession, SESSIONS_PATH, TABLES_PATH, session_path};
use chat::{ApiError, ChatBackend, DatabaseInfo, Session, SessionDetail};

/// `ChatBackend` over same-origin `/api` requests.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpBackend;

#[cfg(any(test, not(feature = "hydrate")))]
fn unavailable() -> ApiError {
    ApiError::Transport("not available on server".to_owned())
}

/// Map a `gloo-net` failure, recognising an aborted fetch.
#[cfg(feature = "hydrate")]
pub(crate) fn request_error(err: gloo_net::Error) -> ApiError {
    match err {
        gloo_net::Error::JsError(js) if is_abort(&js.name) => ApiError::Aborted,
        other => ApiError::Transport(other.to_string()),
    }
}

#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn is_abort(error_name: &str) -> bool {
    error_name == "AbortError"
}

/// Pass a 2xx response through; turn anything else into `ApiError::Status`.
#[cfg(feature = "hydrate")]
pub(crate) async fn check_status(resp: gloo_net::http::Response) -> Result<gloo_net::http::Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::from_response(resp.status(), &resp.status_text(), &body))
}

#[cfg(feature = "hydrate")]
async fn read_json<T: serde::de::DeserializeOwned>(resp: gloo_net::http::Response) -> Result<T, ApiError> {
    let resp = check_status(resp).await?;
    resp.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(feature = "hydrate")]
async fn get_json<T: serde::de::DeserializeOwned>(url: &str) -> Result<T, ApiError> {
    let resp = gloo_net::http::Request::get(url).send().await.map_err(request_error)?;
    read_json(resp).await
}

#[async_trait(?Send)]
impl ChatBackend for HttpBackend {
    async fn list_sessions(&self) -> Result<Vec<Session>, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            get_json(SESSIONS_PATH).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(unavailable())
        }
    }

    async fn create_session(&self, title: &str) -> Result<Session, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::post(SESSIONS_PATH)
                .json(&NewSession { title })
                .map_err(request_error)?
                .send()
                .await
                .map_err(request_error)?;
            read_json(resp).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = title;
            Err(unavailable())
        }
    }

    async fn session_detail(&self, session_id: &str) -> Result<SessionDetail, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            get_json(&session_path(session_id)).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = session_id;
            Err(unavailable())
        }
    }

    async fn delete_session(&self, session_id: &str) -> Result<(), ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let resp = gloo_net::http::Request::delete(&session_path(session_id))
                .send()
                .await
                .map_err(request_error)?;
            check_status(resp).await.map(|_| ())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = session_id;
            Err(unavailable())
        }
    }

    async fn list_tables(&self) -> Result<DatabaseInfo, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            get_json(TABLES_PATH).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(unavailable())
        }
    }

    async fn open_chat(&self, session_id: &str, message: &str) -> Result<ByteStream, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            super::chat_stream::open(session_id, message).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (session_id, message);
            Err(unavailable())
        }
    }
}

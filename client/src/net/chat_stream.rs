//! Fetch body reader for `POST /api/chat/{session_id}`.
//!
//! DESIGN
//! ======
//! The response body is read through the WHATWG stream reader and exposed as
//! a `futures` stream of byte chunks. The request's `AbortController` lives
//! inside that stream: dropping the stream (or the future still waiting for
//! response headers) aborts the fetch, which is how a cancelled turn tears
//! down its connection.
//!
//! ERROR HANDLING
//! ==============
//! A rejected read whose error is named `AbortError` is a cancellation;
//! anything else is a transport failure carrying the browser's message.

#[cfg(test)]
#[path = "chat_stream_test.rs"]
mod chat_stream_test;

#[cfg(any(test, feature = "hydrate"))]
use events::TransportError;

/// Classify a failed body read by the browser error's name and message.
#[cfg(any(test, feature = "hydrate"))]
fn classify_failure(error_name: &str, message: &str) -> TransportError {
    if super::api::is_abort(error_name) {
        return TransportError::Aborted;
    }
    let message = message.trim();
    if message.is_empty() {
        TransportError::Failed(format!("{error_name} while reading response"))
    } else {
        TransportError::Failed(message.to_owned())
    }
}

#[cfg(feature = "hydrate")]
pub use browser::open;

#[cfg(feature = "hydrate")]
mod browser {
    use chat::ApiError;
    use chat::backend::{ByteStream, ChatRequest, chat_path};
    use events::TransportError;
    use futures::StreamExt as _;
    use js_sys::{Reflect, Uint8Array};
    use wasm_bindgen::{JsCast as _, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{AbortController, AbortSignal, ReadableStreamDefaultReader};

    use super::classify_failure;
    use crate::net::api::{check_status, request_error};

    /// Aborts the request when dropped.
    struct AbortGuard(AbortController);

    impl AbortGuard {
        fn new() -> Result<Self, ApiError> {
            AbortController::new()
                .map(Self)
                .map_err(|_| ApiError::Transport("AbortController unavailable".to_owned()))
        }

        fn signal(&self) -> AbortSignal {
            self.0.signal()
        }
    }

    impl Drop for AbortGuard {
        fn drop(&mut self) {
            self.0.abort();
        }
    }

    struct BodyReader {
        reader: ReadableStreamDefaultReader,
        failed: bool,
        _abort: AbortGuard,
    }

    impl BodyReader {
        async fn next_chunk(&self) -> Result<Option<Vec<u8>>, TransportError> {
            let result = JsFuture::from(self.reader.read()).await.map_err(js_failure)?;
            let done = Reflect::get(&result, &JsValue::from_str("done"))
                .ok()
                .and_then(|v| v.as_bool())
                .unwrap_or(true);
            if done {
                return Ok(None);
            }
            let value = Reflect::get(&result, &JsValue::from_str("value")).map_err(js_failure)?;
            Ok(Some(Uint8Array::new(&value).to_vec()))
        }
    }

    fn js_failure(err: JsValue) -> TransportError {
        if let Some(dom) = err.dyn_ref::<web_sys::DomException>() {
            return classify_failure(&dom.name(), &dom.message());
        }
        if let Some(js) = err.dyn_ref::<js_sys::Error>() {
            return classify_failure(&String::from(js.name()), &String::from(js.message()));
        }
        classify_failure("Error", &err.as_string().unwrap_or_default())
    }

    /// Send the question and hand back the response body as a byte stream.
    ///
    /// # Errors
    ///
    /// Fails when the request cannot be sent, the server answers non-2xx,
    /// or the response has no readable body.
    pub async fn open(session_id: &str, message: &str) -> Result<ByteStream, ApiError> {
        let abort = AbortGuard::new()?;
        let resp = gloo_net::http::Request::post(&chat_path(session_id))
            .abort_signal(Some(&abort.signal()))
            .json(&ChatRequest { message })
            .map_err(request_error)?
            .send()
            .await
            .map_err(request_error)?;
        let resp = check_status(resp).await?;
        let body = resp
            .body()
            .ok_or_else(|| ApiError::Decode("chat response has no body".to_owned()))?;
        let reader: ReadableStreamDefaultReader = body.get_reader().unchecked_into();

        let state = BodyReader { reader, failed: false, _abort: abort };
        let chunks = futures::stream::unfold(state, |mut state| async move {
            if state.failed {
                return None;
            }
            match state.next_chunk().await {
                Ok(Some(chunk)) => Some((Ok(chunk), state)),
                Ok(None) => None,
                Err(err) => {
                    state.failed = true;
                    Some((Err(err), state))
                }
            }
        });
        Ok(chunks.boxed_local())
    }
}

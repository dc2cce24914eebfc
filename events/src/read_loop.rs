//! Async read loop over a chat response body.
//!
//! SYSTEM CONTEXT
//! ==============
//! Front ends adapt their HTTP body (`gloo-net` readable stream, `reqwest`
//! byte stream, or an in-memory stream in tests) into a
//! `Stream<Item = Result<bytes, TransportError>>` and hand it here together
//! with a [`ChatHandler`]. The loop suspends only while awaiting the next
//! chunk.
//!
//! ERROR HANDLING
//! ==============
//! A failed body read reports `error` then `done`. An aborted read ends the
//! loop with no callbacks at all: cancellation is never user-visible.

#[cfg(test)]
#[path = "read_loop_test.rs"]
mod read_loop_test;

use futures_util::{Stream, StreamExt};

use crate::dispatch::{ChatHandler, Dispatcher};
use crate::parser::SseParser;

/// Classified failure of a body read or request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The client cancelled the request.
    #[error("request aborted")]
    Aborted,
    /// The connection or body failed.
    #[error("{0}")]
    Failed(String),
}

/// How a read loop ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StreamOutcome {
    /// `done` fired (explicitly, synthesized, or after a failure).
    Completed,
    /// The read was aborted; neither `error` nor `done` fired.
    Aborted,
}

/// Consume `body` until it ends, the turn is done, or the read is aborted.
///
/// Reading stops as soon as `done` has fired so a server that keeps the
/// connection open after the final record does not hold the turn open.
pub async fn read_event_stream<S, B, H>(body: S, handler: H) -> StreamOutcome
where
    S: Stream<Item = Result<B, TransportError>>,
    B: AsRef<[u8]>,
    H: ChatHandler,
{
    let mut body = std::pin::pin!(body);
    let mut parser = SseParser::new();
    let mut dispatcher = Dispatcher::new(handler);

    while let Some(chunk) = body.next().await {
        match chunk {
            Ok(bytes) => {
                for record in parser.push(bytes.as_ref()) {
                    dispatcher.dispatch_record(record);
                }
                if dispatcher.is_done() {
                    return StreamOutcome::Completed;
                }
            }
            Err(TransportError::Aborted) => return StreamOutcome::Aborted,
            Err(TransportError::Failed(message)) => {
                log::warn!("chat stream failed: {message}");
                dispatcher.fail(message);
                return StreamOutcome::Completed;
            }
        }
    }

    if let Some(record) = parser.finish() {
        dispatcher.dispatch_record(record);
    }
    dispatcher.finish();
    StreamOutcome::Completed
}

/// Short-circuit for a request that never produced a readable body:
/// report `error` then `done` without parsing anything.
pub fn fail_request<H: ChatHandler>(handler: H, message: impl Into<String>) {
    Dispatcher::new(handler).fail(message);
}

//! Server-sent-event wire layer for the chat stream.
//!
//! This crate owns everything between the raw response body of
//! `POST /api/chat/{session_id}` and typed callbacks: the incremental line
//! parser, the typed [`ChatEvent`] model (including the chart payload), the
//! per-turn [`Dispatcher`], and the async read loop shared by the browser and
//! terminal front ends.
//!
//! DESIGN
//! ======
//! Parsing is synchronous and allocation-light so it can be driven from any
//! executor. Only [`read_event_stream`] is async, and it is generic over the
//! body stream so both `gloo-net` and `reqwest` bodies plug in unchanged.

pub mod dispatch;
pub mod event;
pub mod parser;
pub mod read_loop;

pub use dispatch::{ChatHandler, Dispatcher};
pub use event::{ChartConfig, ChartType, ChatEvent, EventError};
pub use parser::{SseParser, SseRecord};
pub use read_loop::{StreamOutcome, TransportError, fail_request, read_event_stream};

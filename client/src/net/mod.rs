//! Networking for the chat backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements the `ChatBackend` seam over `gloo-net`; `chat_stream`
//! turns the fetch response body of a chat request into the byte stream the
//! event reader consumes.

pub mod api;
pub mod chat_stream;

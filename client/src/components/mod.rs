//! Page components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the chat store and UI state from Leptos context and call
//! `chat::controller` operations for anything that talks to the backend.

pub mod chart_panel;
pub mod chat_area;
pub mod chat_input;
pub mod message_bubble;
pub mod schema_panel;
pub mod sidebar;
pub mod thinking_process;

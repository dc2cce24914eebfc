//! Client-side state containers shared through Leptos context.
//!
//! SYSTEM CONTEXT
//! ==============
//! `chat` adapts the reactive store signal to the controller's store seam;
//! `ui` holds presentation-only state such as notices and the schema drawer.

pub mod chat;
pub mod ui;

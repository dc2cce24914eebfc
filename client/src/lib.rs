//! Browser front end for the natural-language database assistant.
//!
//! SYSTEM CONTEXT
//! ==============
//! A three-column Leptos page: sessions on the left, the streaming chat in
//! the middle, generated SQL and charts on the right. All state transitions
//! go through the `chat` crate; this crate only renders and wires browser
//! I/O (`gloo-net` requests, the fetch body reader, timers).
//!
//! Browser-only code sits behind the `hydrate` feature. Without it the same
//! components compile against inert network stubs so native builds and unit
//! tests need no browser.

pub mod app;
pub mod components;
pub mod net;
pub mod state;
pub mod util;

/// WASM entry point: install logging and mount the app.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}

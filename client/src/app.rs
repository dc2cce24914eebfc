//! Root component, shared context, and background tasks.
//!
//! DESIGN
//! ======
//! Context carries three signals: the [`ChatStore`], local [`UiState`], and
//! the [`Ticker`] clock that drives running step durations. The ticker
//! advances every 500 ms only while a turn is streaming.

use std::future::Future;

use chat::{ChatStore, SystemClock, controller};
use leptos::prelude::*;
use leptos_meta::{Title, provide_meta_context};

use crate::components::chart_panel::ChartPanel;
use crate::components::chat_area::ChatArea;
use crate::components::sidebar::Sidebar;
use crate::net::api::HttpBackend;
use crate::state::chat::SignalStore;
use crate::state::ui::UiState;

/// Interval between re-renders of running step durations.
pub const TICK_MS: u64 = 500;

/// Epoch-millisecond "now" used when rendering step durations.
#[derive(Clone, Copy)]
pub struct Ticker(pub RwSignal<i64>);

/// Run `task` on the browser event loop. Native builds have no event loop
/// and drop it.
pub fn spawn_task(task: impl Future<Output = ()> + 'static) {
    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(task);
    #[cfg(not(feature = "hydrate"))]
    drop(task);
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let chat = RwSignal::new(ChatStore::new(SystemClock));
    let ui = RwSignal::new(UiState::default());
    let now = RwSignal::new(chat.with_untracked(ChatStore::now_ms));
    provide_context(chat);
    provide_context(ui);
    provide_context(Ticker(now));

    start_ticker(chat, now);

    spawn_task(async move {
        if let Err(err) = controller::load_sessions(&SignalStore(chat), &HttpBackend).await {
            ui.update(|u| u.report(&err));
        }
    });

    view! {
        <Title text="AskDB" />
        <div class="layout">
            <aside class="layout__sidebar">
                <Sidebar />
            </aside>
            <main class="layout__main">
                <ChatArea />
            </main>
            <aside class="layout__chart">
                <ChartPanel />
            </aside>
        </div>
    }
}

fn start_ticker(chat: RwSignal<ChatStore>, now: RwSignal<i64>) {
    #[cfg(feature = "hydrate")]
    {
        let ticking = RwSignal::new(false);
        Effect::new(move || {
            if !chat.with(|s| s.streaming) || ticking.get_untracked() {
                return;
            }
            ticking.set(true);
            leptos::task::spawn_local(async move {
                loop {
                    now.set(chat.with_untracked(ChatStore::now_ms));
                    gloo_timers::future::sleep(std::time::Duration::from_millis(TICK_MS)).await;
                    if !chat.with_untracked(|s| s.streaming) {
                        break;
                    }
                }
                now.set(chat.with_untracked(ChatStore::now_ms));
                ticking.set(false);
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (chat, now);
    }
}

//! Left column: session list with new/select/delete, and the schema drawer.

use chat::{ChatStore, Session, controller};
use leptos::prelude::*;

use crate::app::spawn_task;
use crate::components::schema_panel::SchemaPanel;
use crate::net::api::HttpBackend;
use crate::state::chat::SignalStore;
use crate::state::ui::UiState;
use crate::util::format::session_time_label;

#[component]
pub fn Sidebar() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatStore>>();
    let ui = expect_context::<RwSignal<UiState>>();

    let on_new = move |_| {
        spawn_task(async move {
            if let Err(err) = controller::create_session(&SignalStore(chat), &HttpBackend).await {
                ui.update(|u| u.report(&err));
            }
        });
    };

    view! {
        <div class="sidebar">
            <div class="sidebar__header">
                <span class="sidebar__title">"Sessions"</span>
                <button class="sidebar__new" on:click=on_new>
                    "+ New chat"
                </button>
            </div>
            <div class="sidebar__list">
                {move || {
                    let (sessions, current) = chat.with(|s| (s.sessions.clone(), s.current_session_id.clone()));
                    if sessions.is_empty() {
                        return view! { <div class="sidebar__empty">"No conversations yet. Start a new one above."</div> }
                            .into_any();
                    }
                    sessions
                        .into_iter()
                        .map(|session| {
                            let active = current.as_deref() == Some(session.id.as_str());
                            view! { <SessionItem session=session active=active /> }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
            </div>
            <SchemaPanel />
        </div>
    }
}

#[component]
fn SessionItem(session: Session, active: bool) -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatStore>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let time = session_time_label(&session.updated_at);
    let select_id = session.id.clone();
    let delete_id = session.id;

    let on_select = move |_| {
        if active {
            return;
        }
        let id = select_id.clone();
        spawn_task(async move {
            if let Err(err) = controller::select_session(&SignalStore(chat), &HttpBackend, &id).await {
                ui.update(|u| u.report(&err));
            }
        });
    };

    let on_delete = move |ev: leptos::ev::MouseEvent| {
        ev.stop_propagation();
        let id = delete_id.clone();
        spawn_task(async move {
            if let Err(err) = controller::delete_session(&SignalStore(chat), &HttpBackend, &id).await {
                ui.update(|u| u.report(&err));
            }
        });
    };

    view! {
        <div class="session" class:session--active=active on:click=on_select>
            <div class="session__text">
                <span class="session__title">{session.title}</span>
                <span class="session__time">{time}</span>
            </div>
            <button class="session__delete" title="Delete conversation" on:click=on_delete>
                "✕"
            </button>
        </div>
    }
}

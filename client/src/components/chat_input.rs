//! Question box: Enter sends, Shift+Enter inserts a newline, and a stop
//! button replaces send while a turn streams.

use chat::{ChatStore, controller};
use leptos::prelude::*;

use crate::app::spawn_task;
use crate::net::api::HttpBackend;
use crate::state::chat::SignalStore;

#[component]
pub fn ChatInput() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatStore>>();
    let draft = RwSignal::new(String::new());

    let streaming = move || chat.with(|s| s.streaming);
    let has_session = move || chat.with(|s| s.current_session_id.is_some());
    let can_send = move || !streaming() && has_session() && !draft.with(|d| d.trim().is_empty());

    let do_send = move || {
        if !can_send() {
            return;
        }
        let text = draft.get_untracked();
        draft.set(String::new());
        spawn_task(async move {
            controller::send_message(&SignalStore(chat), &HttpBackend, &text).await;
        });
    };

    let on_keydown = move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            do_send();
        }
    };

    view! {
        <div class="chat-input">
            <div class="chat-input__row">
                <textarea
                    class="chat-input__text"
                    rows="2"
                    placeholder="Ask about your data, e.g. what are total sales by region?"
                    disabled=move || streaming() || !has_session()
                    prop:value=move || draft.get()
                    on:input=move |ev| draft.set(event_target_value(&ev))
                    on:keydown=on_keydown
                ></textarea>
                {move || {
                    if streaming() {
                        view! {
                            <button
                                class="chat-input__stop"
                                on:click=move |_| controller::cancel(&SignalStore(chat))
                            >
                                "Stop"
                            </button>
                        }
                            .into_any()
                    } else {
                        view! {
                            <button class="chat-input__send" disabled=move || !can_send() on:click=move |_| do_send()>
                                "Send"
                            </button>
                        }
                            .into_any()
                    }
                }}
            </div>
            <div class="chat-input__hint">"Enter to send, Shift+Enter for a new line"</div>
        </div>
    }
}

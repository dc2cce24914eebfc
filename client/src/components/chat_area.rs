//! Middle column: header, error notice, transcript, and input.

#[cfg(test)]
#[path = "chat_area_test.rs"]
mod chat_area_test;

use chat::ChatStore;
use leptos::prelude::*;

use crate::components::chat_input::ChatInput;
use crate::components::message_bubble::MessageBubble;
use crate::state::ui::UiState;

/// Transcript keys in display order. Streaming answer text leaves this
/// unchanged, so the keyed list keeps its rows.
pub fn message_ids(store: &ChatStore) -> Vec<String> {
    store.messages.iter().map(|m| m.id.clone()).collect()
}

/// Whether `id` is the reply still receiving chunks.
pub fn is_streaming_message(store: &ChatStore, id: &str) -> bool {
    store.streaming && store.messages.last().is_some_and(|m| m.id == id)
}

#[component]
pub fn ChatArea() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatStore>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let messages_ref = NodeRef::<leptos::html::Div>::new();
    let ids = Memo::new(move |_| chat.with(message_ids));

    // Follow the bottom of the transcript as replies stream in.
    Effect::new(move || {
        let _ = chat.with(|s| (s.messages.len(), s.messages.last().map(|m| m.content.len())));

        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = messages_ref.get() {
                el.set_scroll_top(el.scroll_height());
            }
        }
    });

    let title = move || {
        chat.with(|s| {
            s.current_session()
                .map_or_else(|| "Database assistant".to_owned(), |session| session.title.clone())
        })
    };

    view! {
        <div class="chat-area">
            <div class="chat-area__header">
                <span class="chat-area__title">{title}</span>
                <span class="chat-area__subtitle">"Ask questions in plain language; the assistant writes the SQL"</span>
            </div>

            {move || {
                ui.with(|u| u.notice.clone())
                    .map(|notice| {
                        view! {
                            <div class="notice" on:click=move |_| ui.update(UiState::dismiss_notice)>
                                {notice}
                            </div>
                        }
                    })
            }}

            <div class="chat-area__messages" node_ref=messages_ref>
                <Show
                    when=move || ids.with(|ids| !ids.is_empty())
                    fallback=|| {
                        view! {
                            <div class="chat-area__empty">
                                <div class="chat-area__empty-title">"Start a conversation"</div>
                                <div class="chat-area__empty-hint">"Try: what are total sales by region?"</div>
                            </div>
                        }
                    }
                >
                    <For each=move || ids.get() key=|id| id.clone() let:id>
                        <TranscriptRow id=id />
                    </For>
                </Show>
            </div>

            <ChatInput />
        </div>
    }
}

/// One keyed transcript entry. The timeline's expanded flag lives here so it
/// survives the bubble re-rendering while its reply streams.
#[component]
fn TranscriptRow(id: String) -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatStore>>();
    let expanded = RwSignal::new(true);
    let lookup = id.clone();
    let message = Memo::new(move |_| chat.with(|s| s.messages.iter().find(|m| m.id == lookup).cloned()));
    let streaming = Memo::new(move |_| chat.with(|s| is_streaming_message(s, &id)));

    view! {
        {move || {
            message
                .get()
                .map(|message| {
                    view! { <MessageBubble message=message streaming=streaming.get() expanded=expanded /> }
                })
        }}
    }
}

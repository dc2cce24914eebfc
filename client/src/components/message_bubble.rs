//! One transcript entry: user text, or the assistant's timeline, result
//! table, and markdown answer.

use chat::{Message, QueryTable, Role};
use leptos::prelude::*;

use crate::components::thinking_process::ThinkingProcess;
use crate::util::format::{RESULT_ROW_LIMIT, more_rows_label, result_header};
use crate::util::markdown::render_markdown_html;

#[component]
pub fn MessageBubble(
    message: Message,
    #[prop(optional)] streaming: bool,
    /// Whether the thinking timeline is open; owned by the caller so it
    /// outlives this bubble.
    expanded: RwSignal<bool>,
) -> impl IntoView {
    if message.role == Role::User {
        return view! {
            <div class="bubble bubble--user">
                <div class="bubble__avatar">"🧑"</div>
                <div class="bubble__content">
                    <div class="bubble__user-text">{message.content}</div>
                </div>
            </div>
        }
        .into_any();
    }

    let steps = message.thinking_steps.clone().filter(|steps| !steps.is_empty());
    let table = message.result_table();
    let content = message.content;

    view! {
        <div class="bubble bubble--ai">
            <div class="bubble__avatar">"🤖"</div>
            <div class="bubble__content">
                {steps.map(|steps| view! { <ThinkingProcess steps=steps streaming=streaming expanded=expanded /> })}
                {table.map(|table| view! { <ResultTable table=table /> })}
                {(!content.is_empty())
                    .then(|| {
                        let rendered = render_markdown_html(&content);
                        view! {
                            <div class="bubble__markdown">
                                <div inner_html=rendered></div>
                                {streaming.then(|| view! { <span class="bubble__cursor"></span> })}
                            </div>
                        }
                    })}
            </div>
        </div>
    }
    .into_any()
}

#[component]
fn ResultTable(table: QueryTable) -> impl IntoView {
    let mut table = table;
    let header = result_header(table.rows.len());
    let hidden = table.truncate(RESULT_ROW_LIMIT);

    view! {
        <div class="result">
            <div class="result__header">{header}</div>
            <div class="result__scroll">
                <table class="result__table">
                    <thead>
                        <tr>
                            {table.columns.into_iter().map(|col| view! { <th>{col}</th> }).collect::<Vec<_>>()}
                        </tr>
                    </thead>
                    <tbody>
                        {table
                            .rows
                            .into_iter()
                            .map(|row| {
                                view! {
                                    <tr>
                                        {row.into_iter().map(|cell| view! { <td>{cell}</td> }).collect::<Vec<_>>()}
                                    </tr>
                                }
                            })
                            .collect::<Vec<_>>()}
                    </tbody>
                </table>
            </div>
            {more_rows_label(hidden).map(|label| view! { <div class="result__more">{label}</div> })}
        </div>
    }
}

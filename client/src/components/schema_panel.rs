//! Collapsible drawer listing the database tables the assistant can query.

use chat::{ChatBackend, TableInfo};
use leptos::prelude::*;

use crate::app::spawn_task;
use crate::net::api::HttpBackend;
use crate::state::ui::{SchemaState, UiState};

#[component]
pub fn SchemaPanel() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    let on_toggle = move |_| {
        if ui.try_update(UiState::toggle_schema).unwrap_or(false) {
            spawn_task(async move {
                let result = HttpBackend.list_tables().await;
                ui.update(|u| u.schema_loaded(result));
            });
        }
    };

    view! {
        <div class="schema">
            <button class="schema__toggle" on:click=on_toggle>
                {move || if ui.with(|u| u.schema_open) { "▾ Tables" } else { "▸ Tables" }}
            </button>
            <Show when=move || ui.with(|u| u.schema_open)>
                {move || match ui.with(|u| u.schema.clone()) {
                    SchemaState::Idle | SchemaState::Loading => {
                        view! { <div class="schema__status">"Loading…"</div> }.into_any()
                    }
                    SchemaState::Failed(message) => {
                        view! { <div class="schema__status schema__status--error">{message}</div> }.into_any()
                    }
                    SchemaState::Loaded(info) => {
                        view! {
                            <div class="schema__body">
                                <div class="schema__dialect">{info.dialect}</div>
                                {info.tables.into_iter().map(|table| view! { <TableEntry table=table /> }).collect::<Vec<_>>()}
                            </div>
                        }
                            .into_any()
                    }
                }}
            </Show>
        </div>
    }
}

#[component]
fn TableEntry(table: TableInfo) -> impl IntoView {
    view! {
        <div class="schema__table">
            <div class="schema__table-name">
                {table.name} <span class="schema__rows">{format!("{} rows", table.row_count)}</span>
            </div>
            <ul class="schema__columns">
                {table
                    .columns
                    .into_iter()
                    .map(|col| {
                        view! {
                            <li>
                                <span class="schema__column">{col.name}</span>
                                " "
                                <span class="schema__type">{col.data_type}</span>
                            </li>
                        }
                    })
                    .collect::<Vec<_>>()}
            </ul>
        </div>
    }
}

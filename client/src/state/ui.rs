//! Presentation state: error notice and the schema drawer.

#[cfg(test)]
#[path = "ui_test.rs"]
mod ui_test;

use chat::{ApiError, DatabaseInfo};

/// Load state of the table schema shown in the sidebar drawer.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SchemaState {
    #[default]
    Idle,
    Loading,
    Loaded(DatabaseInfo),
    Failed(String),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UiState {
    /// Last request failure, shown until dismissed.
    pub notice: Option<String>,
    pub schema_open: bool,
    pub schema: SchemaState,
}

impl UiState {
    /// Surface a failed request. Cancellations are not failures.
    pub fn report(&mut self, err: &ApiError) {
        if *err != ApiError::Aborted {
            self.notice = Some(err.user_message());
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Open or close the schema drawer. Returns `true` when opening it
    /// should start a fetch (nothing loaded yet, or the last fetch failed).
    pub fn toggle_schema(&mut self) -> bool {
        self.schema_open = !self.schema_open;
        let fetch = self.schema_open && matches!(self.schema, SchemaState::Idle | SchemaState::Failed(_));
        if fetch {
            self.schema = SchemaState::Loading;
        }
        fetch
    }

    pub fn schema_loaded(&mut self, result: Result<DatabaseInfo, ApiError>) {
        self.schema = match result {
            Ok(info) => SchemaState::Loaded(info),
            Err(err) => SchemaState::Failed(err.user_message()),
        };
    }
}

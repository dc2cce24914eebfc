//! Reactive handle to the chat store.

use chat::ChatStore;
use chat::controller::StoreAccess;
use leptos::prelude::*;

/// The chat store signal, usable wherever the controller expects a store.
///
/// Each access is one `try_update`, so every controller step notifies the
/// views once. Access after the owning scope is disposed yields `None`.
#[derive(Clone, Copy)]
pub struct SignalStore(pub RwSignal<ChatStore>);

impl StoreAccess for SignalStore {
    fn with_store<R>(&self, f: impl FnOnce(&mut ChatStore) -> R) -> Option<R> {
        self.0.try_update(f)
    }
}

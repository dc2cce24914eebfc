//! Async chat operations over a shared store and a [`ChatBackend`].
//!
//! DESIGN
//! ======
//! The controller never holds a borrow of the store across an `.await`:
//! every touch goes through [`StoreAccess::with_store`] for one synchronous
//! mutation. That lets the browser keep the store in a reactive signal and
//! the terminal client keep it in an `Rc<RefCell<_>>`.
//!
//! A turn runs as an [`Abortable`] future registered with the store's
//! [`CancelHandle`]; cancelling drops the in-flight request and body read at
//! the next poll, so no callback of a cancelled turn ever lands.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::cell::RefCell;
use std::rc::Rc;

use events::{ChartConfig, ChatHandler, StreamOutcome, fail_request, read_event_stream};
use futures_util::future::Abortable;

use crate::backend::{ApiError, ChatBackend};
use crate::cancel::CancelHandle;
use crate::model::{DEFAULT_SESSION_TITLE, Session};
use crate::store::{ChatStore, TurnRequest};

/// Short-lived mutable access to the chat store.
pub trait StoreAccess {
    /// Run `f` against the store. Returns `None` when the store is gone or
    /// already borrowed.
    fn with_store<R>(&self, f: impl FnOnce(&mut ChatStore) -> R) -> Option<R>;
}

impl StoreAccess for RefCell<ChatStore> {
    fn with_store<R>(&self, f: impl FnOnce(&mut ChatStore) -> R) -> Option<R> {
        match self.try_borrow_mut() {
            Ok(mut store) => Some(f(&mut store)),
            Err(_) => {
                log::warn!("chat store is already borrowed");
                None
            }
        }
    }
}

impl<T: StoreAccess + ?Sized> StoreAccess for Rc<T> {
    fn with_store<R>(&self, f: impl FnOnce(&mut ChatStore) -> R) -> Option<R> {
        (**self).with_store(f)
    }
}

/// Forwards one turn's callbacks into the store while that turn is current.
struct StoreSink<'a, A> {
    store: &'a A,
    turn_id: &'a str,
}

impl<A: StoreAccess> StoreSink<'_, A> {
    fn apply(&self, f: impl FnOnce(&mut ChatStore)) {
        let turn_id = self.turn_id;
        self.store.with_store(|store| {
            if store.is_active_turn(turn_id) {
                f(store);
            }
        });
    }
}

impl<A: StoreAccess> ChatHandler for StoreSink<'_, A> {
    fn on_sql(&mut self, sql: String) {
        self.apply(|store| store.on_sql(sql));
    }
    fn on_query_result(&mut self, rows: String) {
        self.apply(|store| store.on_query_result(rows));
    }
    fn on_answer(&mut self, chunk: String) {
        self.apply(|store| store.on_answer(chunk));
    }
    fn on_chart(&mut self, chart: ChartConfig) {
        self.apply(|store| store.on_chart(chart));
    }
    fn on_error(&mut self, message: String) {
        self.apply(|store| store.on_error(message));
    }
    fn on_done(&mut self) {
        self.apply(|store| store.on_done());
    }
}

/// What became of a [`send_message`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Nothing was sent: a turn is already streaming, no session is
    /// selected, or the message was blank.
    Rejected,
    /// `done` fired, after a normal end or a reported error.
    Completed,
    /// The turn was cancelled before `done`.
    Cancelled,
}

// =============================================================================
// SESSIONS
// =============================================================================

/// Fetch the session list. When nothing is selected yet, the first session
/// is selected and its transcript loaded.
///
/// # Errors
///
/// Returns the backend error of the list or detail request.
pub async fn load_sessions<A, B>(store: &A, backend: &B) -> Result<(), ApiError>
where
    A: StoreAccess,
    B: ChatBackend + ?Sized,
{
    let sessions = backend.list_sessions().await?;
    let first = store
        .with_store(|s| {
            s.set_sessions(sessions);
            if s.current_session_id.is_some() {
                return None;
            }
            s.sessions.first().map(|session| session.id.clone())
        })
        .flatten();
    if let Some(id) = first {
        select_session(store, backend, &id).await?;
    }
    Ok(())
}

/// Best-effort list refresh, used after a turn so server-side renames show.
pub async fn refresh_sessions<A, B>(store: &A, backend: &B)
where
    A: StoreAccess,
    B: ChatBackend + ?Sized,
{
    match backend.list_sessions().await {
        Ok(sessions) => {
            store.with_store(|s| s.set_sessions(sessions));
        }
        Err(err) => log::warn!("session refresh failed: {err}"),
    }
}

/// Switch to `session_id`, cancelling any running turn, and load its
/// transcript. A transcript that arrives after the user moved on is dropped.
///
/// # Errors
///
/// Returns the backend error of the detail request.
pub async fn select_session<A, B>(store: &A, backend: &B, session_id: &str) -> Result<(), ApiError>
where
    A: StoreAccess,
    B: ChatBackend + ?Sized,
{
    store.with_store(|s| s.select(session_id));
    let detail = backend.session_detail(session_id).await?;
    store.with_store(|s| s.load_detail(session_id, detail));
    Ok(())
}

/// Create a session with the default title, put it first and select it.
///
/// # Errors
///
/// Returns the backend error of the create request.
pub async fn create_session<A, B>(store: &A, backend: &B) -> Result<Session, ApiError>
where
    A: StoreAccess,
    B: ChatBackend + ?Sized,
{
    let session = backend.create_session(DEFAULT_SESSION_TITLE).await?;
    store.with_store(|s| s.insert_created(session.clone()));
    Ok(session)
}

/// Delete `session_id`. When it was current, the next session is selected
/// and loaded.
///
/// # Errors
///
/// Returns the backend error of the delete or follow-up detail request.
pub async fn delete_session<A, B>(store: &A, backend: &B, session_id: &str) -> Result<(), ApiError>
where
    A: StoreAccess,
    B: ChatBackend + ?Sized,
{
    backend.delete_session(session_id).await?;
    let next = store.with_store(|s| s.remove_session(session_id)).flatten();
    if let Some(next) = next {
        let detail = backend.session_detail(&next).await?;
        store.with_store(|s| s.load_detail(&next, detail));
    }
    Ok(())
}

// =============================================================================
// TURNS
// =============================================================================

/// Send `content` to the current session and stream the reply into the
/// store until `done` fires or the turn is cancelled.
pub async fn send_message<A, B>(store: &A, backend: &B, content: &str) -> TurnOutcome
where
    A: StoreAccess,
    B: ChatBackend + ?Sized,
{
    let Some(turn) = store.with_store(|s| s.begin_turn(content)).flatten() else {
        return TurnOutcome::Rejected;
    };
    let (handle, registration) = CancelHandle::pair();
    store.with_store(|s| s.attach_cancel(handle));

    let outcome = Abortable::new(run_turn(store, backend, &turn), registration)
        .await
        .unwrap_or(StreamOutcome::Aborted);

    match outcome {
        StreamOutcome::Completed => {
            refresh_sessions(store, backend).await;
            TurnOutcome::Completed
        }
        StreamOutcome::Aborted => {
            store.with_store(|s| s.release_turn(&turn.turn_id));
            log::debug!("turn {} cancelled", turn.turn_id);
            TurnOutcome::Cancelled
        }
    }
}

async fn run_turn<A, B>(store: &A, backend: &B, turn: &TurnRequest) -> StreamOutcome
where
    A: StoreAccess,
    B: ChatBackend + ?Sized,
{
    let sink = StoreSink { store, turn_id: &turn.turn_id };
    match backend.open_chat(&turn.session_id, &turn.message).await {
        Ok(body) => read_event_stream(body, sink).await,
        Err(ApiError::Aborted) => StreamOutcome::Aborted,
        Err(err) => {
            log::warn!("chat request failed: {err}");
            fail_request(sink, err.user_message());
            StreamOutcome::Completed
        }
    }
}

/// Stop the running turn, if any.
pub fn cancel<A: StoreAccess>(store: &A) {
    store.with_store(ChatStore::cancel_turn);
}

//! Chat application state and the per-event reducers.
//!
//! DESIGN
//! ======
//! `ChatStore` is plain data plus synchronous mutators. Async orchestration
//! lives in [`crate::controller`]; views hold the store behind a reactive
//! signal. A streaming turn appends a user message and an assistant
//! placeholder, then each [`ChatHandler`] callback patches that placeholder
//! in place.
//!
//! Only one turn streams at a time. A turn is identified by the id of its
//! assistant placeholder so late callbacks from a cancelled turn can be told
//! apart from the current one.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use events::{ChartConfig, ChatHandler};
use uuid::Uuid;

use crate::cancel::CancelHandle;
use crate::clock::{Clock, SharedClock};
use crate::model::{Message, Session, SessionDetail, SqlEntry, parse_timestamp_ms, row_count};
use crate::timeline::{self, StepKey, StepPatch, ThinkingStep};

/// Prefix shown before a server error when the turn produced no answer text.
pub const ERROR_PREFIX: &str = "⚠️ ";

/// A turn accepted by [`ChatStore::begin_turn`], ready to be sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnRequest {
    pub session_id: String,
    pub message: String,
    /// Id of the assistant placeholder this turn fills.
    pub turn_id: String,
}

#[derive(Clone, Debug, Default)]
pub struct ChatStore {
    pub sessions: Vec<Session>,
    pub current_session_id: Option<String>,
    pub messages: Vec<Message>,
    pub charts: Vec<ChartConfig>,
    pub sql_history: Vec<SqlEntry>,
    pub streaming: bool,
    active_turn: Option<String>,
    cancel: Option<CancelHandle>,
    clock: SharedClock,
}

impl ChatStore {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self { clock: SharedClock::new(clock), ..Self::default() }
    }

    #[must_use]
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    #[must_use]
    pub fn current_session(&self) -> Option<&Session> {
        let id = self.current_session_id.as_deref()?;
        self.sessions.iter().find(|session| session.id == id)
    }

    #[must_use]
    pub fn is_active_turn(&self, turn_id: &str) -> bool {
        self.streaming && self.active_turn.as_deref() == Some(turn_id)
    }

    #[must_use]
    pub fn has_cancel_handle(&self) -> bool {
        self.cancel.is_some()
    }

    // =========================================================================
    // TURN LIFECYCLE
    // =========================================================================

    /// Start a turn: append the user message and an assistant placeholder
    /// with a fresh timeline.
    ///
    /// Returns `None` while another turn is streaming, when no session is
    /// selected, or when `content` is blank.
    pub fn begin_turn(&mut self, content: &str) -> Option<TurnRequest> {
        if self.streaming {
            log::debug!("ignoring send while a turn is streaming");
            return None;
        }
        let session_id = self.current_session_id.clone()?;
        let content = content.trim();
        if content.is_empty() {
            return None;
        }

        let now = self.now_ms();
        let user = Message::user(temp_id(), session_id.clone(), content);
        let mut assistant = Message::assistant(temp_id(), session_id.clone());
        assistant.thinking_steps = Some(timeline::initialize(now));
        let turn_id = assistant.id.clone();

        self.messages.push(user);
        self.messages.push(assistant);
        self.streaming = true;
        self.active_turn = Some(turn_id.clone());

        Some(TurnRequest { session_id, message: content.to_owned(), turn_id })
    }

    /// Keep the abort handle of the running turn. A handle arriving when no
    /// turn is streaming is fired immediately.
    pub fn attach_cancel(&mut self, handle: CancelHandle) {
        if self.streaming {
            self.cancel = Some(handle);
        } else {
            handle.cancel();
        }
    }

    /// Abort the running turn, if any. Content and timeline stay as they were.
    pub fn cancel_turn(&mut self) {
        if let Some(handle) = self.cancel.take() {
            handle.cancel();
        }
        self.streaming = false;
        self.active_turn = None;
    }

    /// End `turn_id` without touching the transcript, when it is still the
    /// running turn.
    pub fn release_turn(&mut self, turn_id: &str) {
        if self.active_turn.as_deref() == Some(turn_id) {
            self.cancel = None;
            self.streaming = false;
            self.active_turn = None;
        }
    }

    /// Apply `f` to the assistant placeholder of the running turn.
    fn patch_turn(&mut self, f: impl FnOnce(&mut Message, i64)) {
        if !self.streaming {
            log::debug!("dropping chat callback: no turn is streaming");
            return;
        }
        let now = self.now_ms();
        let turn_id = self.active_turn.as_deref();
        match self.messages.last_mut() {
            Some(last) if last.is_assistant() && Some(last.id.as_str()) == turn_id => f(last, now),
            _ => log::debug!("dropping chat callback: last message is not the streaming reply"),
        }
    }

    // =========================================================================
    // SESSIONS
    // =========================================================================

    pub fn set_sessions(&mut self, sessions: Vec<Session>) {
        self.sessions = sessions;
    }

    /// Make `session_id` current and clear the transcript. A running turn is
    /// cancelled first.
    pub fn select(&mut self, session_id: &str) {
        if self.streaming {
            self.cancel_turn();
        }
        self.current_session_id = Some(session_id.to_owned());
        self.clear_transcript();
    }

    fn clear_transcript(&mut self) {
        self.messages.clear();
        self.charts.clear();
        self.sql_history.clear();
    }

    /// Install a fetched transcript. Returns `false` and changes nothing when
    /// the user has switched away from `session_id` in the meantime.
    pub fn load_detail(&mut self, session_id: &str, detail: SessionDetail) -> bool {
        if self.current_session_id.as_deref() != Some(session_id) {
            log::debug!("discarding stale transcript for session {session_id}");
            return false;
        }
        let (mut charts, mut sql_history) = rebuild_history(&detail.messages);
        let mut messages = detail.messages;
        if self.streaming {
            // Selecting cleared the transcript, so whatever is held now
            // belongs to a turn sent before the fetch resolved.
            messages.append(&mut self.messages);
            charts.append(&mut self.charts);
            sql_history.append(&mut self.sql_history);
        }
        self.messages = messages;
        self.charts = charts;
        self.sql_history = sql_history;
        true
    }

    /// Put a newly created session first and select it.
    pub fn insert_created(&mut self, session: Session) {
        let id = session.id.clone();
        self.sessions.retain(|existing| existing.id != id);
        self.sessions.insert(0, session);
        self.select(&id);
    }

    /// Drop `session_id` from the list.
    ///
    /// When it was the current session the first remaining session becomes
    /// current (its id is returned so the caller can load it), or nothing is
    /// selected when the list is now empty.
    pub fn remove_session(&mut self, session_id: &str) -> Option<String> {
        self.sessions.retain(|session| session.id != session_id);
        if self.current_session_id.as_deref() != Some(session_id) {
            return None;
        }
        match self.sessions.first().map(|session| session.id.clone()) {
            Some(next) => {
                self.select(&next);
                Some(next)
            }
            None => {
                self.cancel_turn();
                self.current_session_id = None;
                self.clear_transcript();
                None
            }
        }
    }
}

impl ChatHandler for ChatStore {
    fn on_sql(&mut self, sql: String) {
        let mut recorded = false;
        self.patch_turn(|message, now| {
            let steps = timeline::update(steps_of(message), StepKey::Sql, &StepPatch::detail(sql.clone()));
            message.thinking_steps = Some(timeline::advance(&steps, StepKey::Exec, now));
            message.sql_query = Some(sql.clone());
            recorded = true;
        });
        if recorded {
            let timestamp = self.now_ms();
            self.sql_history.push(SqlEntry { sql, timestamp });
        }
    }

    fn on_query_result(&mut self, rows: String) {
        self.patch_turn(|message, now| {
            let detail = format!("{} rows returned", row_count(&rows));
            let steps = timeline::update(steps_of(message), StepKey::Exec, &StepPatch::detail(detail));
            message.thinking_steps = Some(timeline::advance(&steps, StepKey::Answer, now));
            message.query_result = Some(rows);
        });
    }

    fn on_answer(&mut self, chunk: String) {
        self.patch_turn(|message, _| message.content.push_str(&chunk));
    }

    fn on_chart(&mut self, chart: ChartConfig) {
        let mut recorded = false;
        self.patch_turn(|message, now| {
            let steps = timeline::advance(steps_of(message), StepKey::Chart, now);
            let patch = StepPatch::done(now).with_detail(format!("{} chart", chart.chart_type));
            message.thinking_steps = Some(timeline::update(&steps, StepKey::Chart, &patch));
            message.chart_config = Some(chart.clone());
            recorded = true;
        });
        if recorded {
            self.charts.push(chart);
        }
    }

    fn on_error(&mut self, message: String) {
        self.patch_turn(|reply, _| {
            reply.thinking_steps = Some(timeline::fail_running(steps_of(reply), &message));
            if reply.content.is_empty() {
                reply.content = format!("{ERROR_PREFIX}{message}");
            }
        });
    }

    fn on_done(&mut self) {
        self.patch_turn(|message, now| {
            message.thinking_steps = Some(timeline::finish_all(steps_of(message), now));
        });
        self.cancel = None;
        self.streaming = false;
        self.active_turn = None;
    }
}

fn steps_of(message: &Message) -> &[ThinkingStep] {
    message.thinking_steps.as_deref().unwrap_or_default()
}

fn temp_id() -> String {
    format!("temp-{}", Uuid::new_v4())
}

/// Charts and SQL history recovered from a persisted transcript, in
/// message order. SQL timestamps come from each message's `created_at`.
#[must_use]
pub fn rebuild_history(messages: &[Message]) -> (Vec<ChartConfig>, Vec<SqlEntry>) {
    let charts = messages.iter().filter_map(|message| message.chart_config.clone()).collect();
    let sql_history = messages
        .iter()
        .filter_map(|message| {
            let sql = message.sql_query.clone()?;
            let timestamp = parse_timestamp_ms(&message.created_at).unwrap_or(0);
            Some(SqlEntry { sql, timestamp })
        })
        .collect();
    (charts, sql_history)
}

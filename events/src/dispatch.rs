//! Routing of parsed records to typed callbacks.
//!
//! A [`Dispatcher`] lives for exactly one turn. It owns the latch that makes
//! `done` fire once per turn whether it arrives as an explicit record, is
//! synthesized at end of stream, or follows a transport failure.

#[cfg(test)]
#[path = "dispatch_test.rs"]
mod dispatch_test;

use crate::event::{ChartConfig, ChatEvent, EventError};
use crate::parser::SseRecord;

/// Receiver of chat turn callbacks. Every method defaults to a no-op.
pub trait ChatHandler {
    fn on_sql(&mut self, _sql: String) {}
    fn on_query_result(&mut self, _rows: String) {}
    fn on_answer(&mut self, _chunk: String) {}
    fn on_chart(&mut self, _chart: ChartConfig) {}
    fn on_error(&mut self, _message: String) {}
    fn on_done(&mut self) {}
}

impl<H: ChatHandler + ?Sized> ChatHandler for &mut H {
    fn on_sql(&mut self, sql: String) {
        (**self).on_sql(sql);
    }
    fn on_query_result(&mut self, rows: String) {
        (**self).on_query_result(rows);
    }
    fn on_answer(&mut self, chunk: String) {
        (**self).on_answer(chunk);
    }
    fn on_chart(&mut self, chart: ChartConfig) {
        (**self).on_chart(chart);
    }
    fn on_error(&mut self, message: String) {
        (**self).on_error(message);
    }
    fn on_done(&mut self) {
        (**self).on_done();
    }
}

/// Per-turn router from records to [`ChatHandler`] callbacks.
pub struct Dispatcher<H> {
    handler: H,
    done: bool,
}

impl<H: ChatHandler> Dispatcher<H> {
    pub fn new(handler: H) -> Self {
        Self { handler, done: false }
    }

    /// Whether `done` has already fired for this turn.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Decode and route one parsed record.
    ///
    /// Unknown events and malformed chart payloads are dropped silently.
    pub fn dispatch_record(&mut self, record: SseRecord) {
        match ChatEvent::decode(record) {
            Ok(event) => self.dispatch(event),
            Err(EventError::UnknownEvent(name)) => log::debug!("ignoring unknown chat event `{name}`"),
            Err(err @ EventError::InvalidChart(_)) => log::debug!("dropping chart record: {err}"),
        }
    }

    /// Route one typed event. Events after `done` are ignored.
    pub fn dispatch(&mut self, event: ChatEvent) {
        if self.done {
            log::debug!("ignoring `{}` after done", event.name());
            return;
        }
        match event {
            ChatEvent::Sql(sql) => self.handler.on_sql(sql),
            ChatEvent::QueryResult(rows) => self.handler.on_query_result(rows),
            ChatEvent::Answer(chunk) => self.handler.on_answer(chunk),
            ChatEvent::Chart(chart) => self.handler.on_chart(chart),
            ChatEvent::Error(message) => self.handler.on_error(message),
            ChatEvent::Done => self.finish(),
        }
    }

    /// Report a failure, then end the turn.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.dispatch(ChatEvent::Error(message.into()));
        self.finish();
    }

    /// Fire `done` unless it already fired.
    pub fn finish(&mut self) {
        if self.done {
            return;
        }
        self.done = true;
        self.handler.on_done();
    }

    /// Give back the handler.
    pub fn into_inner(self) -> H {
        self.handler
    }
}

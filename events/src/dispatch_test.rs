use super::*;
use crate::event::ChartType;

#[derive(Debug, Default)]
struct Recorder {
    calls: Vec<String>,
    charts: Vec<ChartConfig>,
}

impl ChatHandler for Recorder {
    fn on_sql(&mut self, sql: String) {
        self.calls.push(format!("sql:{sql}"));
    }
    fn on_query_result(&mut self, rows: String) {
        self.calls.push(format!("query_result:{rows}"));
    }
    fn on_answer(&mut self, chunk: String) {
        self.calls.push(format!("answer:{chunk}"));
    }
    fn on_chart(&mut self, chart: ChartConfig) {
        self.calls.push(format!("chart:{}", chart.chart_type));
        self.charts.push(chart);
    }
    fn on_error(&mut self, message: String) {
        self.calls.push(format!("error:{message}"));
    }
    fn on_done(&mut self) {
        self.calls.push("done".to_owned());
    }
}

// =============================================================
// Routing
// =============================================================

#[test]
fn records_route_to_matching_callbacks() {
    let mut recorder = Recorder::default();
    let mut dispatcher = Dispatcher::new(&mut recorder);
    dispatcher.dispatch_record(SseRecord::new("sql", "SELECT 1"));
    dispatcher.dispatch_record(SseRecord::new("query_result", "[1]"));
    dispatcher.dispatch_record(SseRecord::new("answer", "A"));
    dispatcher.dispatch_record(SseRecord::new("chart", r#"{"chartType":"line","option":{}}"#));
    dispatcher.dispatch_record(SseRecord::new("error", "oops"));
    dispatcher.dispatch_record(SseRecord::new("done", ""));

    assert_eq!(
        recorder.calls,
        vec!["sql:SELECT 1", "query_result:[1]", "answer:A", "chart:line", "error:oops", "done"]
    );
    assert_eq!(recorder.charts[0].chart_type, ChartType::Line);
}

#[test]
fn malformed_chart_fires_no_callback() {
    let mut recorder = Recorder::default();
    let mut dispatcher = Dispatcher::new(&mut recorder);
    dispatcher.dispatch_record(SseRecord::new("chart", "{not json"));
    assert!(!dispatcher.is_done());
    assert!(recorder.calls.is_empty());
}

#[test]
fn unknown_event_fires_no_callback() {
    let mut recorder = Recorder::default();
    Dispatcher::new(&mut recorder).dispatch_record(SseRecord::new("ping", "1"));
    assert!(recorder.calls.is_empty());
}

#[test]
fn default_handler_methods_are_no_ops() {
    struct Silent;
    impl ChatHandler for Silent {}

    let mut dispatcher = Dispatcher::new(Silent);
    dispatcher.dispatch(ChatEvent::Answer("ignored".to_owned()));
    dispatcher.finish();
    assert!(dispatcher.is_done());
}

// =============================================================
// Done latch
// =============================================================

#[test]
fn done_fires_once_across_explicit_and_implicit_triggers() {
    let mut recorder = Recorder::default();
    let mut dispatcher = Dispatcher::new(&mut recorder);
    dispatcher.dispatch_record(SseRecord::new("done", ""));
    dispatcher.dispatch_record(SseRecord::new("done", ""));
    dispatcher.finish();
    assert_eq!(recorder.calls, vec!["done"]);
}

#[test]
fn events_after_done_are_ignored() {
    let mut recorder = Recorder::default();
    let mut dispatcher = Dispatcher::new(&mut recorder);
    dispatcher.finish();
    dispatcher.dispatch_record(SseRecord::new("answer", "late"));
    dispatcher.dispatch(ChatEvent::Error("late".to_owned()));
    assert_eq!(recorder.calls, vec!["done"]);
}

#[test]
fn fail_reports_error_then_done() {
    let mut recorder = Recorder::default();
    let mut dispatcher = Dispatcher::new(&mut recorder);
    dispatcher.fail("Session not found");
    dispatcher.finish();
    assert_eq!(recorder.calls, vec!["error:Session not found", "done"]);
}

#[test]
fn into_inner_returns_the_handler() {
    let mut dispatcher = Dispatcher::new(Recorder::default());
    dispatcher.dispatch(ChatEvent::Sql("SELECT 9".to_owned()));
    let recorder = dispatcher.into_inner();
    assert_eq!(recorder.calls, vec!["sql:SELECT 9"]);
}

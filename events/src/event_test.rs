use super::*;

fn decode(event: &str, data: &str) -> Result<ChatEvent, EventError> {
    ChatEvent::decode(SseRecord::new(event, data))
}

// =============================================================
// Pass-through events
// =============================================================

#[test]
fn text_events_pass_data_through_unmodified() {
    assert_eq!(decode("sql", " SELECT 1 ").unwrap(), ChatEvent::Sql(" SELECT 1 ".to_owned()));
    assert_eq!(decode("query_result", "[]").unwrap(), ChatEvent::QueryResult("[]".to_owned()));
    assert_eq!(decode("answer", "line\n").unwrap(), ChatEvent::Answer("line\n".to_owned()));
    assert_eq!(decode("error", "boom").unwrap(), ChatEvent::Error("boom".to_owned()));
}

#[test]
fn done_ignores_its_payload() {
    assert_eq!(decode("done", "").unwrap(), ChatEvent::Done);
    assert_eq!(decode("done", "anything").unwrap(), ChatEvent::Done);
}

#[test]
fn unknown_event_is_rejected_with_its_name() {
    let err = decode("heartbeat", "1").expect_err("unknown event");
    assert!(matches!(err, EventError::UnknownEvent(name) if name == "heartbeat"));
}

#[test]
fn name_matches_wire_name() {
    assert_eq!(ChatEvent::Done.name(), "done");
    assert_eq!(ChatEvent::QueryResult(String::new()).name(), "query_result");
}

// =============================================================
// Chart payloads
// =============================================================

#[test]
fn chart_payload_decodes_camel_case_fields() {
    let data = r#"{"chartType":"bar","title":"Sales by region","option":{"xAxis":{"type":"category"}}}"#;
    let ChatEvent::Chart(chart) = decode("chart", data).unwrap() else {
        panic!("expected chart event");
    };
    assert_eq!(chart.chart_type, ChartType::Bar);
    assert_eq!(chart.display_title(), Some("Sales by region"));
    assert_eq!(chart.option["xAxis"]["type"], "category");
}

#[test]
fn chart_title_and_option_are_optional() {
    let ChatEvent::Chart(chart) = decode("chart", r#"{"chartType":"pie"}"#).unwrap() else {
        panic!("expected chart event");
    };
    assert_eq!(chart.chart_type, ChartType::Pie);
    assert!(chart.title.is_none());
    assert!(chart.option.is_null());
}

#[test]
fn empty_chart_title_has_no_display_title() {
    let chart: ChartConfig = serde_json::from_str(r#"{"chartType":"line","title":"  "}"#).unwrap();
    assert_eq!(chart.display_title(), None);
}

#[test]
fn malformed_chart_json_is_an_invalid_chart() {
    let err = decode("chart", "{not json").expect_err("malformed chart");
    assert!(matches!(err, EventError::InvalidChart(_)));
}

#[test]
fn unsupported_chart_type_is_an_invalid_chart() {
    let err = decode("chart", r#"{"chartType":"radar"}"#).expect_err("radar is unsupported");
    assert!(matches!(err, EventError::InvalidChart(_)));
}

#[test]
fn chart_serializes_with_wire_keys() {
    let chart = ChartConfig { chart_type: ChartType::Scatter, title: None, option: serde_json::json!({}) };
    let value = serde_json::to_value(&chart).unwrap();
    assert_eq!(value, serde_json::json!({ "chartType": "scatter", "option": {} }));
}

#[test]
fn chart_type_displays_lowercase() {
    assert_eq!(ChartType::Table.to_string(), "table");
}

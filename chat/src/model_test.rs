use super::*;
use crate::timeline::{StepKey, StepStatus};

const MAY_FIRST_NOON_MS: i64 = 1_714_564_800_000;

// =============================================================
// Messages
// =============================================================

#[test]
fn message_decodes_backend_shape() {
    let raw = r#"{
        "id": "m1",
        "session_id": "s1",
        "role": "assistant",
        "content": "Total is 3",
        "sql_query": "SELECT 3",
        "query_result": "[{\"n\":3}]",
        "chart_config": {"chartType": "bar", "option": {}},
        "created_at": "2024-05-01T12:00:00"
    }"#;
    let message: Message = serde_json::from_str(raw).unwrap();
    assert!(message.is_assistant());
    assert_eq!(message.sql_query.as_deref(), Some("SELECT 3"));
    assert_eq!(message.chart_config.unwrap().chart_type, events::ChartType::Bar);
    assert!(message.thinking_steps.is_none());
}

#[test]
fn stored_chart_that_no_longer_decodes_is_dropped() {
    let raw = r#"{"id":"m1","role":"assistant","chart_config":{"chartType":"radar"}}"#;
    let message: Message = serde_json::from_str(raw).unwrap();
    assert!(message.chart_config.is_none());
}

#[test]
fn null_optional_fields_decode_as_none() {
    let raw = r#"{"id":"m1","role":"user","content":"hi","sql_query":null,"chart_config":null}"#;
    let message: Message = serde_json::from_str(raw).unwrap();
    assert_eq!(message.role, Role::User);
    assert!(message.sql_query.is_none());
    assert!(message.chart_config.is_none());
}

#[test]
fn thinking_steps_use_camel_case_key() {
    let mut message = Message::assistant("a1", "s1");
    message.thinking_steps = Some(crate::timeline::initialize(5));
    let value = serde_json::to_value(&message).unwrap();
    assert_eq!(value["thinkingSteps"][0]["key"], "sql");
    assert_eq!(value["thinkingSteps"][0]["status"], "running");
    assert_eq!(value["thinkingSteps"][0]["startedAt"], 5);

    let back: Message = serde_json::from_value(value).unwrap();
    let steps = back.thinking_steps.unwrap();
    assert_eq!(steps[0].key, StepKey::Sql);
    assert_eq!(steps[1].status, StepStatus::Pending);
}

#[test]
fn session_detail_tolerates_missing_messages() {
    let detail: SessionDetail =
        serde_json::from_str(r#"{"session":{"id":"s1","title":"Sales"}}"#).unwrap();
    assert_eq!(detail.session.title, "Sales");
    assert!(detail.messages.is_empty());
}

#[test]
fn database_info_maps_type_field() {
    let info: DatabaseInfo = serde_json::from_str(
        r#"{"dialect":"sqlite","tables":[{"name":"orders","columns":[{"name":"id","type":"INTEGER"}],"row_count":2,"sample_rows":[{"id":1}]}],"raw_schema":"CREATE TABLE orders (id INTEGER)"}"#,
    )
    .unwrap();
    assert_eq!(info.dialect, "sqlite");
    assert_eq!(info.tables[0].columns[0].data_type, "INTEGER");
    assert_eq!(info.tables[0].row_count, 2);
    assert_eq!(info.tables[0].sample_rows[0]["id"], 1);
    assert!(info.raw_schema.starts_with("CREATE TABLE"));
}

// =============================================================
// Query rows
// =============================================================

#[test]
fn row_count_counts_array_entries() {
    assert_eq!(row_count(r#"[{"a":1},{"a":2}]"#), 2);
    assert_eq!(row_count("[]"), 0);
    assert_eq!(row_count("not json"), 0);
    assert_eq!(row_count(r#"{"a":1}"#), 0);
}

#[test]
fn query_table_keeps_first_row_column_order() {
    let table = QueryTable::parse(r#"[{"region":"north","total":10,"note":null},{"region":"south","total":2.5}]"#)
        .unwrap();
    assert_eq!(table.columns, vec!["region", "total", "note"]);
    assert_eq!(table.rows[0], vec!["north", "10", ""]);
    assert_eq!(table.rows[1], vec!["south", "2.5", ""]);
}

#[test]
fn query_table_rejects_empty_and_non_object_rows() {
    assert!(QueryTable::parse("[]").is_none());
    assert!(QueryTable::parse("[1,2]").is_none());
    assert!(QueryTable::parse("oops").is_none());
}

#[test]
fn query_table_truncate_reports_cut_rows() {
    let mut table = QueryTable::parse(r#"[{"a":1},{"a":2},{"a":3}]"#).unwrap();
    assert_eq!(table.truncate(2), 1);
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.truncate(10), 0);
}

#[test]
fn result_table_reads_message_rows() {
    let mut message = Message::assistant("a1", "s1");
    assert!(message.result_table().is_none());
    message.query_result = Some(r#"[{"n":1}]"#.to_owned());
    assert_eq!(message.result_table().unwrap().columns, vec!["n"]);
}

// =============================================================
// Timestamps
// =============================================================

#[test]
fn naive_timestamp_is_read_as_utc() {
    assert_eq!(parse_timestamp_ms("2024-05-01T12:00:00"), Some(MAY_FIRST_NOON_MS));
    assert_eq!(parse_timestamp_ms("2024-05-01 12:00:00"), Some(MAY_FIRST_NOON_MS));
}

#[test]
fn fractional_seconds_are_truncated_to_millis() {
    assert_eq!(parse_timestamp_ms("2024-05-01T12:00:00.250"), Some(MAY_FIRST_NOON_MS + 250));
    assert_eq!(parse_timestamp_ms("2024-05-01T12:00:00.123456"), Some(MAY_FIRST_NOON_MS + 123));
    assert_eq!(parse_timestamp_ms("2024-05-01T12:00:00.5"), Some(MAY_FIRST_NOON_MS + 500));
}

#[test]
fn rfc3339_offsets_are_honoured() {
    assert_eq!(parse_timestamp_ms("2024-05-01T12:00:00Z"), Some(MAY_FIRST_NOON_MS));
    assert_eq!(parse_timestamp_ms("2024-05-01T20:00:00+08:00"), Some(MAY_FIRST_NOON_MS));
}

#[test]
fn unparseable_timestamp_is_none() {
    assert_eq!(parse_timestamp_ms(""), None);
    assert_eq!(parse_timestamp_ms("yesterday"), None);
}

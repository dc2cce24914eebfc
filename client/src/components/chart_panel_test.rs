use super::*;
use chat::{ManualClock, Session};
use events::{ChartType, ChatHandler};
use serde_json::json;

fn chart(title: &str) -> ChartConfig {
    ChartConfig { chart_type: ChartType::Bar, title: Some(title.to_owned()), option: json!({}) }
}

fn sql(text: &str) -> SqlEntry {
    SqlEntry { sql: text.to_owned(), timestamp: 0 }
}

// =============================================================================
// PAIRING
// =============================================================================

#[test]
fn pairs_by_position() {
    let pairs = pair_sql_and_charts(&[sql("a"), sql("b")], &[chart("one"), chart("two")]);
    assert_eq!(pairs.len(), 2);
    assert_eq!(pairs[1].sql.as_deref(), Some("b"));
    assert_eq!(pairs[1].chart.as_ref().and_then(|c| c.title.as_deref()), Some("two"));
}

#[test]
fn shorter_side_is_padded() {
    let pairs = pair_sql_and_charts(&[sql("a"), sql("b"), sql("c")], &[chart("one")]);
    assert_eq!(pairs.len(), 3);
    assert!(pairs[0].chart.is_some());
    assert!(pairs[2].chart.is_none());
    assert_eq!(pairs[2].index, 2);

    let pairs = pair_sql_and_charts(&[], &[chart("one")]);
    assert_eq!(pairs.len(), 1);
    assert!(pairs[0].sql.is_none());
}

#[test]
fn nothing_to_pair() {
    assert!(pair_sql_and_charts(&[], &[]).is_empty());
}

#[test]
fn answer_chunks_leave_pairs_unchanged() {
    let mut store = ChatStore::new(ManualClock::new(0));
    store.set_sessions(vec![Session {
        id: "s1".to_owned(),
        title: "sales".to_owned(),
        created_at: String::new(),
        updated_at: String::new(),
    }]);
    store.select("s1");
    store.begin_turn("total sales?").unwrap();
    store.on_sql("SELECT 1".to_owned());
    store.on_chart(chart("one"));
    let before = chart_pairs(&store);
    assert_eq!(before.len(), 1);

    store.on_answer("Sales ".to_owned());
    store.on_answer("are up.".to_owned());
    assert_eq!(chart_pairs(&store), before);

    store.on_done();
    assert_eq!(chart_pairs(&store), before);
}

// =============================================================================
// THEME
// =============================================================================

#[test]
fn theme_hides_title_and_keeps_series() {
    let option = json!({
        "title": { "text": "Sales" },
        "series": [{ "type": "bar", "data": [1, 2] }],
    });
    let themed = themed_option(&option);
    assert_eq!(themed["title"], json!({ "show": false }));
    assert_eq!(themed["series"], option["series"]);
    assert_eq!(themed["backgroundColor"], "transparent");
}

#[test]
fn theme_merges_existing_legend_and_tooltip() {
    let option = json!({
        "legend": { "orient": "vertical" },
        "tooltip": { "trigger": "axis" },
    });
    let themed = themed_option(&option);
    assert_eq!(themed["legend"]["orient"], "vertical");
    assert_eq!(themed["legend"]["textStyle"]["color"], "#8888aa");
    assert_eq!(themed["tooltip"]["trigger"], "axis");
    assert_eq!(themed["tooltip"]["textStyle"]["color"], "#e0e0ff");
}

#[test]
fn axes_are_only_styled_when_present() {
    let pie = themed_option(&json!({ "series": [{ "type": "pie" }] }));
    assert!(pie.get("xAxis").is_none());
    assert!(pie.get("yAxis").is_none());

    let bar = themed_option(&json!({
        "xAxis": { "type": "category", "axisLabel": { "rotate": 30 } },
        "yAxis": { "type": "value" },
    }));
    assert_eq!(bar["xAxis"]["type"], "category");
    assert_eq!(bar["xAxis"]["axisLabel"]["rotate"], 30);
    assert_eq!(bar["xAxis"]["axisLabel"]["color"], "#8888aa");
    assert_eq!(bar["yAxis"]["splitLine"]["lineStyle"]["color"], "rgba(0,240,255,0.06)");
}

#[test]
fn non_object_option_still_themes() {
    let themed = themed_option(&Value::Null);
    assert_eq!(themed["title"], json!({ "show": false }));
    assert!(themed["legend"].is_object());
}

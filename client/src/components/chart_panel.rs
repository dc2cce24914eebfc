//! Right column: each turn's SQL next to the chart it produced.
//!
//! DESIGN
//! ======
//! Charts are drawn by the page's global `echarts` object when the host page
//! loaded it. Without it (or on native builds) the card falls back to the
//! themed option as pretty-printed JSON, so nothing is lost.

#[cfg(test)]
#[path = "chart_panel_test.rs"]
mod chart_panel_test;

use chat::{ChatStore, SqlEntry};
use events::ChartConfig;
use leptos::prelude::*;
use serde_json::{Map, Value, json};

use crate::util::format::chart_badge;

/// One row of the panel: the i-th SQL statement and the i-th chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartPair {
    pub index: usize,
    pub sql: Option<String>,
    pub chart: Option<ChartConfig>,
}

/// Zip SQL history with charts by position, padding the shorter side.
pub fn pair_sql_and_charts(sql_history: &[SqlEntry], charts: &[ChartConfig]) -> Vec<ChartPair> {
    (0..sql_history.len().max(charts.len()))
        .map(|index| ChartPair {
            index,
            sql: sql_history.get(index).map(|entry| entry.sql.clone()),
            chart: charts.get(index).cloned(),
        })
        .collect()
}

/// Rows for the panel. Only SQL history and charts feed in, so answer chunks
/// leave the result unchanged.
pub fn chart_pairs(store: &ChatStore) -> Vec<ChartPair> {
    pair_sql_and_charts(&store.sql_history, &store.charts)
}

fn object(value: Option<&Value>) -> Map<String, Value> {
    value.and_then(Value::as_object).cloned().unwrap_or_default()
}

fn merged(base: Option<&Value>, overrides: Value) -> Value {
    let mut out = object(base);
    if let Value::Object(overrides) = overrides {
        out.extend(overrides);
    }
    Value::Object(out)
}

/// Dark-theme the chart option: hide the built-in title, recolor text,
/// axes, legend and tooltip. Axes are only touched when the option has them;
/// anything the server set that the theme does not override is kept.
pub fn themed_option(option: &Value) -> Value {
    let mut out = object(Some(option));
    out.insert("title".to_owned(), json!({ "show": false }));
    out.insert("backgroundColor".to_owned(), json!("transparent"));
    out.insert("textStyle".to_owned(), json!({ "color": "#8888aa", "fontFamily": "Rajdhani, sans-serif" }));
    out.insert(
        "legend".to_owned(),
        merged(option.get("legend"), json!({ "textStyle": { "color": "#8888aa" } })),
    );

    if let Some(x_axis) = option.get("xAxis") {
        let label = merged(Some(&json!({ "color": "#8888aa" })), Value::Object(object(x_axis.get("axisLabel"))));
        out.insert(
            "xAxis".to_owned(),
            merged(
                Some(x_axis),
                json!({
                    "axisLine": { "lineStyle": { "color": "rgba(0,240,255,0.15)" } },
                    "axisLabel": label,
                    "splitLine": { "lineStyle": { "color": "rgba(0,240,255,0.04)" } },
                }),
            ),
        );
    }
    if let Some(y_axis) = option.get("yAxis") {
        out.insert(
            "yAxis".to_owned(),
            merged(
                Some(y_axis),
                json!({
                    "axisLine": { "lineStyle": { "color": "rgba(0,240,255,0.15)" } },
                    "axisLabel": { "color": "#8888aa" },
                    "splitLine": { "lineStyle": { "color": "rgba(0,240,255,0.06)" } },
                }),
            ),
        );
    }

    out.insert(
        "tooltip".to_owned(),
        merged(
            option.get("tooltip"),
            json!({
                "backgroundColor": "rgba(13,13,26,0.92)",
                "borderColor": "rgba(0,240,255,0.2)",
                "textStyle": { "color": "#e0e0ff" },
            }),
        ),
    );
    Value::Object(out)
}

#[component]
pub fn ChartPanel() -> impl IntoView {
    let chat = expect_context::<RwSignal<ChatStore>>();
    // Answer chunks leave the pairs equal, so mounted cards are kept.
    let pairs = Memo::new(move |_| chat.with(chart_pairs));

    view! {
        <div class="chart-panel">
            <div class="chart-panel__header">"SQL & Charts"</div>
            <div class="chart-panel__list">
                {move || {
                    let pairs = pairs.get();
                    if pairs.is_empty() {
                        return view! {
                            <div class="chart-panel__empty">
                                <div class="chart-panel__empty-icon">"📊"</div>
                                <span>"Ask a question and its SQL and charts show up here"</span>
                            </div>
                        }
                            .into_any();
                    }
                    pairs
                        .into_iter()
                        .map(|pair| {
                            view! {
                                <div class="chart-panel__pair" data-index=pair.index.to_string()>
                                    {pair
                                        .sql
                                        .map(|sql| {
                                            view! {
                                                <div class="sql-card">
                                                    <div class="sql-card__header">"SQL"</div>
                                                    <pre class="sql-card__code">{sql}</pre>
                                                </div>
                                            }
                                        })}
                                    {pair.chart.map(|chart| view! { <ChartCard chart=chart /> })}
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
            </div>
        </div>
    }
}

#[component]
fn ChartCard(chart: ChartConfig) -> impl IntoView {
    let (badge, color) = chart_badge(chart.chart_type);
    let title = chart.display_title().map(str::to_owned);
    let option = themed_option(&chart.option);
    let fallback = serde_json::to_string_pretty(&option).unwrap_or_default();
    let drawn = RwSignal::new(false);
    let host = NodeRef::<leptos::html::Div>::new();

    #[cfg(feature = "hydrate")]
    {
        let instance = StoredValue::new_local(None::<wasm_bindgen::JsValue>);
        Effect::new(move || {
            if drawn.get_untracked() {
                return;
            }
            if let Some(el) = host.get() {
                match browser::draw(&el, &option) {
                    Ok(Some(chart)) => {
                        instance.set_value(Some(chart));
                        drawn.set(true);
                    }
                    Ok(None) => {}
                    Err(err) => log::warn!("chart render failed: {err:?}"),
                }
            }
        });
        on_cleanup(move || {
            if let Some(Some(chart)) = instance.try_update_value(Option::take) {
                if let Err(err) = browser::dispose(&chart) {
                    log::warn!("chart dispose failed: {err:?}");
                }
            }
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = option;

    view! {
        <div class="chart-card">
            <div class="chart-card__title">
                {title.map(|title| view! { <span>{title}</span> })}
                <span
                    class="chart-card__tag"
                    style=format!("background: {color}20; color: {color}; border-color: {color}40")
                >
                    {badge}
                </span>
            </div>
            <div class="chart-card__canvas" node_ref=host></div>
            <Show when=move || !drawn.get()>
                <pre class="chart-card__fallback">{fallback.clone()}</pre>
            </Show>
        </div>
    }
}

#[cfg(feature = "hydrate")]
mod browser {
    use js_sys::{Function, JSON, Object, Reflect};
    use serde_json::Value;
    use wasm_bindgen::{JsCast, JsValue};

    fn method(target: &JsValue, name: &str) -> Result<Function, JsValue> {
        Reflect::get(target, &JsValue::from_str(name))?.dyn_into::<Function>()
    }

    /// Draw `option` into `el` with the global `echarts` and hand back the
    /// chart instance. `None` when the page did not load echarts.
    pub fn draw(el: &web_sys::HtmlDivElement, option: &Value) -> Result<Option<JsValue>, JsValue> {
        let echarts = Reflect::get(&js_sys::global(), &JsValue::from_str("echarts"))?;
        if echarts.is_undefined() || echarts.is_null() {
            return Ok(None);
        }
        let opts = Object::new();
        Reflect::set(&opts, &JsValue::from_str("renderer"), &JsValue::from_str("svg"))?;
        let chart = method(&echarts, "init")?.call3(&echarts, el.as_ref(), &JsValue::NULL, &opts)?;
        let option = JSON::parse(&option.to_string())?;
        method(&chart, "setOption")?.call1(&chart, &option)?;
        Ok(Some(chart))
    }

    /// Release an instance returned by [`draw`].
    pub fn dispose(chart: &JsValue) -> Result<(), JsValue> {
        method(chart, "dispose")?.call0(chart)?;
        Ok(())
    }
}

//! Display formatting for sessions, result tables, and chart badges.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use events::ChartType;

/// Rows shown in an inline result table before the rest are summarised.
pub const RESULT_ROW_LIMIT: usize = 20;

/// `"05-01 12:34"` from an ISO timestamp such as `2024-05-01T12:34:56.123`.
/// Anything that does not look like one is returned unchanged.
pub fn session_time_label(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let iso_like = bytes.len() >= 16
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && matches!(bytes[10], b'T' | b' ')
        && bytes[13] == b':';
    if !iso_like || !raw.is_char_boundary(16) {
        return raw.to_owned();
    }
    format!("{} {}", &raw[5..10], &raw[11..16])
}

pub fn result_header(rows: usize) -> String {
    match rows {
        1 => "Query result (1 row)".to_owned(),
        n => format!("Query result ({n} rows)"),
    }
}

pub fn more_rows_label(hidden: usize) -> Option<String> {
    (hidden > 0).then(|| format!("… {hidden} more rows"))
}

/// Badge text and accent color for a chart card.
pub fn chart_badge(chart_type: ChartType) -> (&'static str, &'static str) {
    match chart_type {
        ChartType::Bar => ("BAR", "#a855f7"),
        ChartType::Line => ("LINE", "#00f0ff"),
        ChartType::Pie => ("PIE", "#ff00e5"),
        ChartType::Scatter => ("SCATTER", "#fbbf24"),
        ChartType::Table => ("TABLE", "#555577"),
    }
}

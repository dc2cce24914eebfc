//! Wire and view models for sessions, messages, and the schema browser.
//!
//! These mirror the JSON the chat backend returns. Deserialization is
//! lenient where the backend is known to be loose: missing optional fields
//! default, and a stored chart that no longer decodes is dropped instead of
//! failing the whole session load.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use events::ChartConfig;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};

use crate::timeline::ThinkingStep;

/// Title given to sessions created from the UI. The backend renames a
/// session carrying this title after its first message.
pub const DEFAULT_SESSION_TITLE: &str = "新对话";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry. Assistant messages accumulate SQL, rows, chart and
/// thinking steps while their turn streams.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    #[serde(default)]
    pub session_id: String,
    pub role: Role,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub sql_query: Option<String>,
    #[serde(default)]
    pub query_result: Option<String>,
    #[serde(default, deserialize_with = "lenient_chart")]
    pub chart_config: Option<ChartConfig>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default, rename = "thinkingSteps", skip_serializing_if = "Option::is_none")]
    pub thinking_steps: Option<Vec<ThinkingStep>>,
}

impl Message {
    #[must_use]
    pub fn user(id: impl Into<String>, session_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self::blank(id.into(), session_id.into(), Role::User, content.into())
    }

    /// Empty assistant placeholder that a streaming turn fills in.
    #[must_use]
    pub fn assistant(id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self::blank(id.into(), session_id.into(), Role::Assistant, String::new())
    }

    fn blank(id: String, session_id: String, role: Role, content: String) -> Self {
        Self {
            id,
            session_id,
            role,
            content,
            sql_query: None,
            query_result: None,
            chart_config: None,
            created_at: String::new(),
            thinking_steps: None,
        }
    }

    #[must_use]
    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }

    /// Rows of `query_result` laid out as a table, if it holds any.
    #[must_use]
    pub fn result_table(&self) -> Option<QueryTable> {
        self.query_result.as_deref().and_then(QueryTable::parse)
    }
}

fn lenient_chart<'de, D>(deserializer: D) -> Result<Option<ChartConfig>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match serde_json::from_value(value) {
        Ok(chart) => Some(chart),
        Err(err) => {
            log::debug!("dropping stored chart: {err}");
            None
        }
    }))
}

/// Response of `GET /api/sessions/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionDetail {
    pub session: Session,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// A generated SQL statement and when it arrived (epoch ms).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlEntry {
    pub sql: String,
    pub timestamp: i64,
}

// =============================================================================
// SCHEMA BROWSER
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(rename = "type", default)]
    pub data_type: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableInfo {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnInfo>,
    #[serde(default)]
    pub row_count: u64,
    #[serde(default)]
    pub sample_rows: Vec<serde_json::Map<String, Value>>,
}

/// Response of `GET /api/database/tables`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    #[serde(default)]
    pub dialect: String,
    #[serde(default)]
    pub tables: Vec<TableInfo>,
    #[serde(default)]
    pub raw_schema: String,
}

// =============================================================================
// QUERY ROWS
// =============================================================================

/// Number of rows in a serialized result set; zero when it is not a JSON array.
#[must_use]
pub fn row_count(raw: &str) -> usize {
    serde_json::from_str::<Vec<Value>>(raw).map_or(0, |rows| rows.len())
}

/// Result rows flattened to display strings. Columns come from the first
/// row's keys, in the order the backend sent them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl QueryTable {
    /// Parse a JSON array of row objects. Returns `None` for anything else
    /// and for an empty array.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let rows = serde_json::from_str::<Vec<serde_json::Map<String, Value>>>(raw).ok()?;
        let columns: Vec<String> = rows.first()?.keys().cloned().collect();
        let rows = rows
            .iter()
            .map(|row| columns.iter().map(|col| cell_text(row.get(col))).collect())
            .collect();
        Some(Self { columns, rows })
    }

    /// Keep at most `limit` rows; returns how many were cut.
    pub fn truncate(&mut self, limit: usize) -> usize {
        let cut = self.rows.len().saturating_sub(limit);
        self.rows.truncate(limit);
        cut
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

// =============================================================================
// TIMESTAMPS
// =============================================================================

/// Parse a backend timestamp to epoch milliseconds.
///
/// Accepts RFC 3339 and the naive `YYYY-MM-DDTHH:MM:SS[.ffffff]` form the
/// backend emits, which is read as UTC.
#[must_use]
pub fn parse_timestamp_ms(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(epoch_ms(parsed));
    }

    let (base, fraction) = match raw.split_once('.') {
        Some((base, fraction)) => (base, Some(fraction)),
        None => (raw, None),
    };
    let base = base.replacen(' ', "T", 1);
    let naive = PrimitiveDateTime::parse(&base, format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]")).ok()?;
    let mut ms = epoch_ms(naive.assume_utc());
    if let Some(fraction) = fraction {
        let digits: String = fraction.chars().take_while(char::is_ascii_digit).take(3).collect();
        if !digits.is_empty() {
            ms += format!("{digits:0<3}").parse::<i64>().ok()?;
        }
    }
    Some(ms)
}

fn epoch_ms(at: OffsetDateTime) -> i64 {
    i64::try_from(at.unix_timestamp_nanos() / 1_000_000).unwrap_or_default()
}

//! Typed chat events and the chart payload.

#[cfg(test)]
#[path = "event_test.rs"]
mod event_test;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::parser::SseRecord;

/// Error returned by [`ChatEvent::decode`].
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// The record's event name is not part of the chat protocol.
    #[error("unknown event: {0}")]
    UnknownEvent(String),
    /// The `chart` record did not carry a valid chart object.
    #[error("invalid chart payload: {0}")]
    InvalidChart(#[from] serde_json::Error),
}

/// Visual chart kind chosen by the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    Scatter,
    Table,
}

impl ChartType {
    /// Lowercase wire name, e.g. `"bar"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Pie => "pie",
            Self::Scatter => "scatter",
            Self::Table => "table",
        }
    }
}

impl std::fmt::Display for ChartType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Chart description carried by a `chart` record.
///
/// `option` is passed through untouched to whatever renders the chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub chart_type: ChartType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub option: Value,
}

impl ChartConfig {
    /// Title for display; empty titles count as absent.
    #[must_use]
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// One semantic event of a chat turn.
#[derive(Clone, Debug, PartialEq)]
pub enum ChatEvent {
    /// Generated SQL text.
    Sql(String),
    /// Serialized query rows (JSON array), passed through verbatim.
    QueryResult(String),
    /// A chunk of the narrated answer.
    Answer(String),
    /// Chart to render for the result.
    Chart(ChartConfig),
    /// Server-reported failure message.
    Error(String),
    /// End of the turn.
    Done,
}

impl ChatEvent {
    /// Map a parsed record to its typed event.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::UnknownEvent`] for names outside the protocol and
    /// [`EventError::InvalidChart`] when chart data is not a chart object.
    pub fn decode(record: SseRecord) -> Result<Self, EventError> {
        let SseRecord { event, data } = record;
        match event.as_str() {
            "sql" => Ok(Self::Sql(data)),
            "query_result" => Ok(Self::QueryResult(data)),
            "answer" => Ok(Self::Answer(data)),
            "chart" => Ok(Self::Chart(serde_json::from_str(&data)?)),
            "error" => Ok(Self::Error(data)),
            "done" => Ok(Self::Done),
            _ => Err(EventError::UnknownEvent(event)),
        }
    }

    /// Wire event name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sql(_) => "sql",
            Self::QueryResult(_) => "query_result",
            Self::Answer(_) => "answer",
            Self::Chart(_) => "chart",
            Self::Error(_) => "error",
            Self::Done => "done",
        }
    }
}

//! Terminal output: live turn progress and plain-text listings.
//!
//! DESIGN
//! ======
//! The turn printer diffs successive snapshots of the assistant message: a
//! step is reported once when it reaches a terminal state, and only the
//! answer text not yet printed is emitted. Progress goes to stderr and the
//! answer to stdout, so `askdb ask ... > answer.md` captures just the answer.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write as _;

use chat::timeline::{elapsed_ms, format_duration};
use chat::{DatabaseInfo, Message, Session, SessionDetail, StepKey, StepStatus, ThinkingStep};

/// One line per finished step, with SQL on indented lines below it.
#[must_use]
pub fn step_line(step: &ThinkingStep, now_ms: i64) -> String {
    let glyph = match step.status {
        StepStatus::Error => "✗",
        StepStatus::Done => "✓",
        StepStatus::Running => "…",
        StepStatus::Pending => " ",
    };
    let mut line = format!("{glyph} {}", step.label);
    if let Some(ms) = elapsed_ms(step, now_ms) {
        let _ = write!(line, " ({})", format_duration(ms));
    }
    match (step.key, step.detail.as_deref()) {
        (StepKey::Sql, Some(sql)) => {
            for sql_line in sql.lines() {
                let _ = write!(line, "\n    {sql_line}");
            }
        }
        (_, Some(detail)) if !detail.is_empty() => {
            let _ = write!(line, ": {detail}");
        }
        _ => {}
    }
    line
}

/// What changed since the previous snapshot of a turn.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Progress {
    pub steps: Vec<String>,
    pub answer: String,
}

#[derive(Debug, Default)]
pub struct TurnPrinter {
    reported: Vec<StepKey>,
    printed: usize,
}

impl TurnPrinter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff `message` against what was already printed.
    pub fn update(&mut self, message: &Message, now_ms: i64) -> Progress {
        let mut progress = Progress::default();
        for step in message.thinking_steps.iter().flatten() {
            if step.status.is_terminal() && !self.reported.contains(&step.key) {
                self.reported.push(step.key);
                progress.steps.push(step_line(step, now_ms));
            }
        }
        if let Some(delta) = message.content.get(self.printed..) {
            progress.answer = delta.to_owned();
            self.printed = message.content.len();
        }
        progress
    }
}

#[must_use]
pub fn session_list(sessions: &[Session]) -> String {
    if sessions.is_empty() {
        return "no sessions\n".to_owned();
    }
    let id_width = sessions.iter().map(|s| s.id.len()).max().unwrap_or(0);
    let mut out = String::new();
    for session in sessions {
        let _ = writeln!(out, "{:<id_width$}  {:<19}  {}", session.id, short_time(&session.updated_at), session.title);
    }
    out
}

fn short_time(raw: &str) -> String {
    raw.replace('T', " ").chars().take(19).collect()
}

#[must_use]
pub fn transcript(detail: &SessionDetail) -> String {
    let mut out = format!("# {}\n", detail.session.title);
    for message in &detail.messages {
        let speaker = if message.is_assistant() { "assistant" } else { "user" };
        let _ = write!(out, "\n[{speaker}]\n");
        if let Some(sql) = message.sql_query.as_deref() {
            let _ = writeln!(out, "```sql\n{sql}\n```");
        }
        if let Some(table) = message.result_table() {
            let _ = writeln!(out, "({} rows: {})", table.rows.len(), table.columns.join(", "));
        }
        let _ = writeln!(out, "{}", message.content);
    }
    out
}

#[must_use]
pub fn table_list(info: &DatabaseInfo) -> String {
    let mut out = String::new();
    if !info.dialect.is_empty() {
        let _ = writeln!(out, "dialect: {}", info.dialect);
    }
    for table in &info.tables {
        let _ = writeln!(out, "{} ({} rows)", table.name, table.row_count);
        for column in &table.columns {
            let _ = writeln!(out, "  {} {}", column.name, column.data_type);
        }
    }
    out
}

//! Four-step "thinking" timeline attached to each assistant turn.
//!
//! DESIGN
//! ======
//! Steps advance in a fixed order (SQL, execution, analysis, chart). Every
//! transform is a pure function from a step slice to a fresh vector so the
//! store can swap the whole timeline at once and views re-render from a
//! consistent snapshot. Times are epoch milliseconds passed in by the caller.
//!
//! Invariants kept by every transform:
//! - at most one step is `Running`;
//! - a `Done` or `Error` step never moves back to `Pending` or `Running`;
//! - `done_at` is only ever set together with a terminal status.

#[cfg(test)]
#[path = "timeline_test.rs"]
mod timeline_test;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKey {
    Sql,
    Exec,
    Answer,
    Chart,
}

impl StepKey {
    pub const ALL: [StepKey; 4] = [StepKey::Sql, StepKey::Exec, StepKey::Answer, StepKey::Chart];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Sql => "Generate SQL query",
            Self::Exec => "Run query",
            Self::Answer => "Analyze results",
            Self::Chart => "Build chart",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    #[default]
    Pending,
    Running,
    Done,
    Error,
}

impl StepStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingStep {
    pub key: StepKey,
    pub label: String,
    pub status: StepStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Partial update merged into one step by [`update`]. `None` fields are left
/// untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepPatch {
    pub status: Option<StepStatus>,
    pub started_at: Option<i64>,
    pub done_at: Option<i64>,
    pub detail: Option<String>,
}

impl StepPatch {
    #[must_use]
    pub fn detail(detail: impl Into<String>) -> Self {
        Self { detail: Some(detail.into()), ..Self::default() }
    }

    /// Mark the step finished at `now_ms`.
    #[must_use]
    pub fn done(now_ms: i64) -> Self {
        Self { status: Some(StepStatus::Done), done_at: Some(now_ms), ..Self::default() }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Fresh timeline: SQL generation running since `now_ms`, the rest pending.
#[must_use]
pub fn initialize(now_ms: i64) -> Vec<ThinkingStep> {
    StepKey::ALL
        .into_iter()
        .map(|key| {
            let first = key == StepKey::Sql;
            ThinkingStep {
                key,
                label: key.label().to_owned(),
                status: if first { StepStatus::Running } else { StepStatus::Pending },
                started_at: first.then_some(now_ms),
                done_at: None,
                detail: None,
            }
        })
        .collect()
}

/// Merge `patch` into the step keyed `key`.
///
/// A patch that would move a finished step back to pending or running keeps
/// the finished status; its other fields still apply. A patch cannot start a
/// step while another one is running: only [`advance`] hands over the
/// running slot.
#[must_use]
pub fn update(steps: &[ThinkingStep], key: StepKey, patch: &StepPatch) -> Vec<ThinkingStep> {
    let other_running = steps.iter().any(|step| step.key != key && step.status == StepStatus::Running);
    steps
        .iter()
        .map(|step| {
            let mut step = step.clone();
            if step.key != key {
                return step;
            }
            if let Some(status) = patch.status {
                let reopens = step.status.is_terminal() && !status.is_terminal();
                let second_running = status == StepStatus::Running && other_running;
                if !reopens && !second_running {
                    step.status = status;
                }
            }
            if patch.started_at.is_some() {
                step.started_at = patch.started_at;
            }
            if patch.done_at.is_some() {
                step.done_at = patch.done_at;
            }
            if patch.detail.is_some() {
                step.detail.clone_from(&patch.detail);
            }
            step
        })
        .collect()
}

/// Finish whatever is running and start `target`.
///
/// A target that already finished stays finished, so replaying an advance is
/// harmless.
#[must_use]
pub fn advance(steps: &[ThinkingStep], target: StepKey, now_ms: i64) -> Vec<ThinkingStep> {
    steps
        .iter()
        .map(|step| {
            let mut step = step.clone();
            if step.key == target {
                if !step.status.is_terminal() {
                    step.status = StepStatus::Running;
                    step.started_at.get_or_insert(now_ms);
                }
            } else if step.status == StepStatus::Running {
                step.status = StepStatus::Done;
                step.done_at = Some(now_ms);
            }
            step
        })
        .collect()
}

/// Mark every running or pending step done at `now_ms`. Finished steps are
/// untouched, which makes this idempotent.
#[must_use]
pub fn finish_all(steps: &[ThinkingStep], now_ms: i64) -> Vec<ThinkingStep> {
    steps
        .iter()
        .map(|step| {
            let mut step = step.clone();
            if !step.status.is_terminal() {
                step.status = StepStatus::Done;
                step.done_at.get_or_insert(now_ms);
            }
            step
        })
        .collect()
}

/// Mark the running step as failed with `detail`.
#[must_use]
pub fn fail_running(steps: &[ThinkingStep], detail: &str) -> Vec<ThinkingStep> {
    steps
        .iter()
        .map(|step| {
            let mut step = step.clone();
            if step.status == StepStatus::Running {
                step.status = StepStatus::Error;
                step.detail = Some(detail.to_owned());
            }
            step
        })
        .collect()
}

#[must_use]
pub fn running_step(steps: &[ThinkingStep]) -> Option<&ThinkingStep> {
    steps.iter().find(|step| step.status == StepStatus::Running)
}

/// Milliseconds a step has taken so far, or took in total once finished.
#[must_use]
pub fn elapsed_ms(step: &ThinkingStep, now_ms: i64) -> Option<i64> {
    let started = step.started_at?;
    Some((step.done_at.unwrap_or(now_ms) - started).max(0))
}

/// `"850ms"` below one second, `"1.2s"` from there on.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_duration(ms: i64) -> String {
    if ms < 1000 {
        format!("{ms}ms")
    } else {
        format!("{:.1}s", ms as f64 / 1000.0)
    }
}

/// One-line summary above the timeline.
#[must_use]
pub fn headline(steps: &[ThinkingStep], streaming: bool) -> String {
    if streaming {
        return running_step(steps).map_or_else(|| "Thinking…".to_owned(), |step| step.label.clone());
    }
    let done = steps.iter().filter(|step| step.status == StepStatus::Done).count();
    format!("Analysis complete · {done} steps")
}

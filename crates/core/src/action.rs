//! Declarative action/schedule/result shapes shared by the registry,
//! dispatcher, and task scheduler.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// How the action scheduler should invoke a matched action's handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Immediate,
    Delayed,
    Batched,
}

/// A declarative rule matching events to a prompt and an invocation kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub event_type: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub fetchers: Vec<String>,
    pub prompt_template_name: String,
    #[serde(rename = "action_type")]
    pub kind: ActionKind,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

fn default_true() -> bool {
    true
}

impl Action {
    /// `metadata.delay`, parsed as seconds if bare, falling back to the
    /// 1-minute default spec.md §4.6 names.
    pub fn delay(&self) -> Duration {
        self.metadata
            .get("delay")
            .and_then(|v| v.as_str())
            .and_then(parse_duration_str)
            .unwrap_or(Duration::from_secs(60))
    }
}

/// Parse a simple `"<n><unit>"` duration string (`s`, `m`, `h`).
pub fn parse_duration_str(s: &str) -> Option<Duration> {
    let s = s.trim();
    let (num, unit) = s.split_at(s.len().checked_sub(1)?);
    let n: u64 = num.parse().ok()?;
    match unit {
        "s" => Some(Duration::from_secs(n)),
        "m" => Some(Duration::from_secs(n * 60)),
        "h" => Some(Duration::from_secs(n * 3600)),
        _ => s.parse::<u64>().ok().map(Duration::from_secs),
    }
}

/// A task scheduler entry: one cron-bound named task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub task: String,
    pub cron: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_true")]
    pub notify: bool,
}

/// Per-task execution journal record, appended as JSON-lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub task: String,
    pub timestamp: DateTime<Utc>,
    pub success: bool,
    pub duration_ms: u64,
    pub message: String,
    #[serde(default)]
    pub output: String,
}

/// An action queued or tracked by the action scheduler.
#[derive(Debug, Clone)]
pub struct ScheduledAction {
    pub event: crate::event::StorageEvent,
    pub action: Action,
    pub scheduled_at: DateTime<Utc>,
    pub execute_at: Option<DateTime<Utc>>,
}

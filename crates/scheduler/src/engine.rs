//! The cron engine: a tick loop that wakes at each minute boundary,
//! matches enabled schedule entries, and fires matched tasks
//! concurrently. `reload` swaps in a freshly-read schedule atomically.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Timelike, Utc};
use hal9000_core::{Clock, ExecutionResult};
use parking_lot::RwLock;

use crate::cron::CronExpr;
use crate::notify::NotifyAdapter;
use crate::results;
use crate::schedule::Schedule;
use crate::task::Task;

struct Entries {
    parsed: Vec<(hal9000_core::ScheduleEntry, CronExpr)>,
}

pub struct CronEngine<C: Clock, N: NotifyAdapter> {
    clock: C,
    notifier: N,
    tasks: BTreeMap<String, Arc<dyn Task>>,
    results_dir: PathBuf,
    entries: Arc<RwLock<Entries>>,
}

impl<C: Clock, N: NotifyAdapter> CronEngine<C, N> {
    pub fn new(clock: C, notifier: N, tasks: BTreeMap<String, Arc<dyn Task>>, results_dir: PathBuf, schedule: &Schedule) -> Self {
        Self {
            clock,
            notifier,
            tasks,
            results_dir,
            entries: Arc::new(RwLock::new(Entries { parsed: schedule.valid_entries() })),
        }
    }

    /// Atomically replaces the in-memory schedule entries, used on SIGHUP.
    pub fn reload(&self, schedule: &Schedule) {
        let parsed = schedule.valid_entries();
        tracing::info!(task_count = parsed.len(), "reloaded schedule");
        self.entries.write().parsed = parsed;
    }

    /// Evaluates every enabled entry against `now`, spawning each match
    /// concurrently. Unmatched minutes and unknown task names are no-ops
    /// beyond a warning log.
    pub async fn tick(&self, now: DateTime<Utc>) {
        let matches: Vec<_> = {
            let entries = self.entries.read();
            entries.parsed.iter().filter(|(_, expr)| expr.matches(now)).map(|(entry, _)| entry.clone()).collect()
        };

        for entry in matches {
            let Some(task) = self.tasks.get(&entry.task).cloned() else {
                tracing::warn!(task = %entry.task, "scheduled task has no registered handler");
                continue;
            };
            let notifier = self.notifier.clone();
            let results_dir = self.results_dir.clone();
            let notify = entry.notify;
            let task_name = entry.task.clone();
            tokio::spawn(async move {
                let outcome = task.run().await;
                let result = ExecutionResult {
                    task: task_name.clone(),
                    timestamp: Utc::now(),
                    success: outcome.success,
                    duration_ms: outcome.duration_ms,
                    message: outcome.message.clone(),
                    output: outcome.output,
                };
                if let Err(e) = results::append_result(&results_dir, &result) {
                    tracing::error!(task = %task_name, error = %e, "failed to record task result");
                }
                if notify {
                    let title = if outcome.success { format!("{task_name} succeeded") } else { format!("{task_name} failed") };
                    if let Err(e) = notifier.notify(&title, &outcome.message).await {
                        tracing::warn!(task = %task_name, error = %e, "failed to send task notification");
                    }
                }
            });
        }
    }

    /// Sleeps until the next minute boundary, then ticks against the
    /// injected clock. Runs until `shutdown` resolves.
    pub async fn run_forever(&self, mut shutdown: tokio::sync::oneshot::Receiver<()>) {
        loop {
            tokio::select! {
                _ = tokio::time::sleep(duration_until_next_minute(Utc::now())) => {
                    self.tick(self.clock.now()).await;
                }
                _ = &mut shutdown => {
                    tracing::info!("cron engine shutting down");
                    break;
                }
            }
        }
    }
}

/// Wall-clock time remaining until the next `:00` second of the next
/// minute, used to align `run_forever`'s wakeups to minute boundaries.
fn duration_until_next_minute(now: DateTime<Utc>) -> std::time::Duration {
    let seconds_into_minute = now.second() as u64;
    let nanos = now.timestamp_subsec_nanos() as u64;
    let elapsed_nanos = seconds_into_minute * 1_000_000_000 + nanos;
    let minute_nanos = 60_000_000_000u64;
    std::time::Duration::from_nanos(minute_nanos.saturating_sub(elapsed_nanos).max(1))
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;

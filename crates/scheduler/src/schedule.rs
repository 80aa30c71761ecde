//! The on-disk JSON schedule: the source of truth `set`/`enable`/
//! `disable` mutate, and the cron engine reloads on SIGHUP.

use std::io::Write;
use std::path::Path;

use hal9000_core::ScheduleEntry;
use serde::{Deserialize, Serialize};

use crate::cron::CronExpr;
use crate::error::SchedulerError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub tasks: Vec<ScheduleEntry>,
}

impl Schedule {
    pub fn load(path: &Path) -> Result<Self, SchedulerError> {
        match std::fs::read(path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), SchedulerError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let bytes = serde_json::to_vec_pretty(self)?;
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.persist(path).map_err(|e| SchedulerError::Io(e.error))?;
        Ok(())
    }

    /// Validates `cron`, then replaces an existing task's expression or
    /// appends a new `{task, cron, enabled: true, notify: true}` row.
    pub fn set(&mut self, task: &str, cron: &str) -> Result<(), SchedulerError> {
        CronExpr::parse(cron)?;
        match self.tasks.iter_mut().find(|t| t.task == task) {
            Some(entry) => entry.cron = cron.to_string(),
            None => self.tasks.push(ScheduleEntry {
                task: task.to_string(),
                cron: cron.to_string(),
                enabled: true,
                notify: true,
            }),
        }
        Ok(())
    }

    pub fn enable(&mut self, task: &str) -> Result<(), SchedulerError> {
        self.set_enabled(task, true)
    }

    pub fn disable(&mut self, task: &str) -> Result<(), SchedulerError> {
        self.set_enabled(task, false)
    }

    fn set_enabled(&mut self, task: &str, enabled: bool) -> Result<(), SchedulerError> {
        let entry = self.tasks.iter_mut().find(|t| t.task == task).ok_or_else(|| SchedulerError::TaskNotFound(task.to_string()))?;
        entry.enabled = enabled;
        Ok(())
    }

    /// Entries whose cron expression fails to parse are skipped with a
    /// logged warning rather than rejected wholesale — invalid expressions
    /// are caught at `set`-time; surviving ones found at load-time mean
    /// the file was hand-edited or predates a grammar change.
    pub fn valid_entries(&self) -> Vec<(ScheduleEntry, CronExpr)> {
        self.tasks
            .iter()
            .filter(|t| t.enabled)
            .filter_map(|entry| match CronExpr::parse(&entry.cron) {
                Ok(parsed) => Some((entry.clone(), parsed)),
                Err(e) => {
                    tracing::warn!(task = %entry.task, cron = %entry.cron, error = %e, "skipping task with invalid cron expression");
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "schedule_tests.rs"]
mod tests;

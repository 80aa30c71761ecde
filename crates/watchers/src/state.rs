//! `FloydState`: the per-watcher baseline of `id → hash` a poll tick diffs
//! against (spec.md §4.4, §3: "one JSON blob per watcher... created on
//! first run, rewritten after every successful poll cycle").

use crate::error::WatcherError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FloydState {
    pub events: BTreeMap<String, String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl FloydState {
    /// An empty state is equivalent to first run — a missing file on disk
    /// loads as `FloydState::default()`, not an error.
    pub fn load(path: &Path) -> Result<Self, WatcherError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let bytes = std::fs::read(path)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Write the new state atomically; a crash mid-write leaves the
    /// previous state file intact, so a subsequent run retries cleanly.
    pub fn save(&self, path: &Path) -> Result<(), WatcherError> {
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;
        let bytes = serde_json::to_vec_pretty(self)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;

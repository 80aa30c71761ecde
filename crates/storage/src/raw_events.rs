//! The raw-event library: `<category>/<category>_<YYYY-MM-DD>_<event_id>.json`.
//!
//! Storing is idempotent: the same `(category, sanitized id)` pair always
//! overwrites the canonical filename for its `fetched_at` date; deleting
//! globs by id across all dates, since a re-fetch after a long gap may
//! change the date segment.

use crate::atomic::write_atomic;
use crate::error::LibraryError;
use chrono::{DateTime, Utc};
use hal9000_core::{sanitize_filename, RawEvent};
use std::path::{Path, PathBuf};

pub fn file_name(category: &str, fetched_at: DateTime<Utc>, event_id: &str) -> String {
    format!(
        "{category}_{}_{}.json",
        fetched_at.format("%Y-%m-%d"),
        sanitize_filename(event_id)
    )
}

pub fn category_dir(base: &Path, category: &str) -> PathBuf {
    base.join(category)
}

/// Store one raw event, overwriting any existing file with the same
/// `(category, sanitized id)` pair for this `fetched_at` date.
pub fn store(base: &Path, category: &str, event: &RawEvent) -> Result<PathBuf, LibraryError> {
    let path = category_dir(base, category).join(file_name(category, event.fetched_at, &event.event_id));
    let bytes = serde_json::to_vec_pretty(&event.to_file_json(category))?;
    write_atomic(&path, &bytes)?;
    Ok(path)
}

/// Delete every file for `event_id` within `category`, across all dates.
/// Returns the number of files removed.
pub fn delete(base: &Path, category: &str, event_id: &str) -> Result<usize, LibraryError> {
    let dir = category_dir(base, category);
    if !dir.exists() {
        return Ok(0);
    }
    let pattern = format!(
        "{}/{category}_*_{}.json",
        glob::Pattern::escape(dir.to_string_lossy().as_ref()),
        sanitize_filename(event_id)
    );
    let mut removed = 0;
    for entry in glob::glob(&pattern).map_err(|e| LibraryError::Io(std::io::Error::new(std::io::ErrorKind::InvalidInput, e)))? {
        if let Ok(path) = entry {
            if std::fs::remove_file(&path).is_ok() {
                removed += 1;
            }
        }
    }
    Ok(removed)
}

#[cfg(test)]
#[path = "raw_events_tests.rs"]
mod tests;

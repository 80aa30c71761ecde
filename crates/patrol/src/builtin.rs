//! Concrete `HealthCheck`/`Cleaner` implementations wired against the
//! library store, so a freshly-built patrol daemon has something real to
//! run out of the box. The staleness check is grounded on
//! `oj-daemon::lifecycle::startup`'s breadcrumb cleanup (mtime-based age
//! comparison against a 7-day threshold).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hal9000_storage::Library;
use std::path::{Path, PathBuf};

use crate::cleaner::Cleaner;
use crate::error::PatrolError;
use crate::health::{HealthCheck, HealthStatus};

/// Confirms the library base path is reachable and enumerable.
pub struct LibraryHealthCheck {
    library: Library,
}

impl LibraryHealthCheck {
    pub fn new(library: Library) -> Self {
        Self { library }
    }
}

#[async_trait]
impl HealthCheck for LibraryHealthCheck {
    fn name(&self) -> &str {
        "library"
    }

    async fn check(&self) -> HealthStatus {
        let library = self.library.clone();
        match tokio::task::spawn_blocking(move || library.list_types()).await {
            Ok(Ok(_)) => HealthStatus::Healthy,
            Ok(Err(e)) => HealthStatus::Unhealthy(e.to_string()),
            Err(e) => HealthStatus::Unhealthy(format!("health check task panicked: {e}")),
        }
    }
}

/// Removes raw-event files older than the staleness threshold, walking
/// every category directory under the library's base path.
pub struct StaleRawEventCleaner {
    base: PathBuf,
}

impl StaleRawEventCleaner {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }
}

#[async_trait]
impl Cleaner for StaleRawEventCleaner {
    fn name(&self) -> &str {
        "stale-raw-events"
    }

    async fn clean(&self, threshold: DateTime<Utc>) -> Result<usize, PatrolError> {
        let base = self.base.clone();
        tokio::task::spawn_blocking(move || remove_stale_files(&base, threshold))
            .await
            .map_err(|e| PatrolError::CleanerFailed("stale-raw-events".into(), e.to_string()))?
    }
}

fn remove_stale_files(base: &Path, threshold: DateTime<Utc>) -> Result<usize, PatrolError> {
    let mut removed = 0;
    let Ok(categories) = std::fs::read_dir(base) else {
        return Ok(0);
    };
    for category in categories.flatten() {
        let category_path = category.path();
        if !category_path.is_dir() {
            continue;
        }
        let Ok(entries) = std::fs::read_dir(&category_path) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let is_stale = entry
                .metadata()
                .ok()
                .and_then(|meta| meta.modified().ok())
                .map(|mtime| DateTime::<Utc>::from(mtime) < threshold)
                .unwrap_or(false);
            if is_stale && std::fs::remove_file(&path).is_ok() {
                removed += 1;
            }
        }
    }
    Ok(removed)
}

#[cfg(test)]
#[path = "builtin_tests.rs"]
mod tests;

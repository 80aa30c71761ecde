//! Sequential cleanup pass with a staleness threshold (spec.md §4.8 step
//! 4). Cleaners run one after another, not concurrently: a cleaner
//! typically has exclusive write access to the thing it's removing, and
//! the cost of a cleanup pass is dwarfed by the patrol interval itself.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::PatrolError;

#[async_trait]
pub trait Cleaner: Send + Sync + 'static {
    fn name(&self) -> &str;

    /// Remove anything older than `threshold`, returning the count removed.
    async fn clean(&self, threshold: DateTime<Utc>) -> Result<usize, PatrolError>;
}

pub async fn run_all(cleaners: &[std::sync::Arc<dyn Cleaner>], threshold: DateTime<Utc>) {
    for cleaner in cleaners {
        match cleaner.clean(threshold).await {
            Ok(removed) => {
                tracing::info!(cleaner = cleaner.name(), removed, "cleanup cycle complete");
            }
            Err(e) => {
                tracing::warn!(cleaner = cleaner.name(), error = %e, "cleaner failed");
            }
        }
    }
}

#[cfg(test)]
#[path = "cleaner_tests.rs"]
mod tests;

//! Parallel health checks under a shared deadline. Grounded in
//! `oj-engine`'s concurrent handler fan-out style: every registered check
//! runs concurrently, stragglers are dropped rather than awaited
//! indefinitely.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Unhealthy(String),
}

#[async_trait]
pub trait HealthCheck: Send + Sync + 'static {
    fn name(&self) -> &str;
    async fn check(&self) -> HealthStatus;
}

/// Run every registered check concurrently under one shared `timeout`.
/// A check that misses the deadline is dropped for this cycle; its entry
/// in `last_health` is left untouched rather than overwritten, so the
/// last-known status is retained.
pub async fn run_all(
    checks: &[(String, Arc<dyn HealthCheck>)],
    timeout: Duration,
    last_health: &RwLock<BTreeMap<String, HealthStatus>>,
) {
    let futures = checks.iter().map(|(name, check)| {
        let name = name.clone();
        let check = Arc::clone(check);
        async move {
            let result = tokio::time::timeout(timeout, check.check()).await;
            (name, result.ok())
        }
    });

    let results = futures::future::join_all(futures).await;
    let mut last_health = last_health.write();
    for (name, status) in results {
        match status {
            Some(status) => {
                last_health.insert(name, status);
            }
            None => {
                tracing::warn!(check = %name, "health check missed deadline, retaining last-known status");
            }
        }
    }
}

#[cfg(test)]
#[path = "health_tests.rs"]
mod tests;

//! The patrol daemon process: wires the built-in library health check and
//! stale-raw-event cleaner into a `Patrol` and runs it until SIGINT.

use hal9000_core::SystemClock;
use hal9000_patrol::{LibraryHealthCheck, Patrol, PatrolConfig, StaleRawEventCleaner};
use hal9000_storage::Library;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let runtime = hal9000_watchers::runtime_dir::runtime_dir();
    let library_base = std::env::var("HAL9000_LIBRARY_DIR").map(std::path::PathBuf::from).unwrap_or_else(|_| runtime.join("library"));
    let library = Library::new(&library_base);

    let config = PatrolConfig::load();
    tracing::info!(
        patrol_interval_secs = config.patrol_interval.as_secs(),
        health_timeout_secs = config.health_timeout.as_secs(),
        stale_threshold_days = config.stale_threshold.num_days(),
        "patrol daemon starting"
    );

    let patrol = Patrol::new(config, SystemClock);
    patrol.register_health_check(Arc::new(LibraryHealthCheck::new(library)));
    patrol.register_cleaner(Arc::new(StaleRawEventCleaner::new(library_base)));

    if let Err(e) = patrol.start() {
        tracing::error!(error = %e, "failed to start patrol daemon");
        std::process::exit(1);
    }

    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("patrol daemon received shutdown signal");
    if let Err(e) = patrol.stop().await {
        tracing::warn!(error = %e, "stop returned an error");
    }
    tracing::info!("patrol daemon stopped");
}

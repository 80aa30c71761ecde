//! Shared `main()` body for the four watcher binaries: install tracing,
//! validate credentials fail-fast, then run the poll loop until SIGINT.

use crate::credentials::Credentials;
use crate::runtime_dir::{credentials_dir, poll_interval_secs, runtime_dir};
use crate::source::FixtureSource;
use crate::state::FloydState;
use crate::watch_loop::{run_forever, WatchConfig};
use hal9000_core::SystemClock;
use std::time::Duration;

pub struct WatcherSpec {
    pub source_name: &'static str,
    pub category: &'static str,
    pub required_credentials: &'static [&'static str],
    pub default_poll_secs: u64,
    pub delete_on_missing: bool,
}

pub async fn run(spec: WatcherSpec) {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let creds_path = credentials_dir().join(format!("{}.json", spec.source_name));
    let credentials = match Credentials::load(&creds_path) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(source = spec.source_name, path = %creds_path.display(), error = %e, "failed to load credentials, exiting");
            std::process::exit(1);
        }
    };
    if let Err(e) = credentials.require_all(spec.required_credentials) {
        tracing::error!(source = spec.source_name, error = %e, "missing required credential field, exiting");
        std::process::exit(1);
    }

    let runtime = runtime_dir();
    let fixture_path = std::env::var(format!("HAL9000_{}_FIXTURE", spec.source_name.to_uppercase())).map(std::path::PathBuf::from).unwrap_or_else(|_| runtime.join(format!("{}-fixture.json", spec.source_name)));
    let source = FixtureSource::new(spec.source_name, fixture_path);

    let state_path = runtime.join(format!("{}-state.json", spec.source_name));
    let mut state = match FloydState::load(&state_path) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(source = spec.source_name, error = %e, "failed to load baseline state, exiting");
            std::process::exit(1);
        }
    };

    let journal = crate::journal::JournalWriter::new(crate::journal::journal_path(&runtime, spec.source_name));
    let poll_env = format!("HAL9000_{}_POLL_SECS", spec.source_name.to_uppercase());
    let config = WatchConfig {
        category: spec.category.to_string(),
        state_path,
        poll_interval: Duration::from_secs(poll_interval_secs(&poll_env, spec.default_poll_secs)),
        delete_on_missing: spec.delete_on_missing,
    };

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        let _ = shutdown_tx.send(());
    });

    tracing::info!(source = spec.source_name, poll_interval_secs = config.poll_interval.as_secs(), "watcher starting");
    run_forever(&source, &SystemClock, &mut state, &journal, &config, shutdown_rx).await;
    tracing::info!(source = spec.source_name, "watcher stopped");
}

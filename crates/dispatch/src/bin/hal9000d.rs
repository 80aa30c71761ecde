//! The dispatcher daemon: tails each watcher's journal, writes matched
//! events through to the library, and dispatches registered actions to
//! the LLM CLI (spec.md §4.6, §4.7).

use anyhow::Context;
use hal9000_bus::{EventBus, StorageHandler};
use hal9000_core::SystemClock;
use hal9000_dispatch::{ActionScheduler, Dispatcher, DispatcherConfig, JournalTail, ProcessLlmInvoker};
use hal9000_registry::{ActionRegistry, PromptRegistry};
use hal9000_storage::Library;
use parking_lot::RwLock;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let config = DispatcherConfig::load();
    let runtime_dir = hal9000_watchers::runtime_dir::runtime_dir();

    let library = Library::new(&config.library_dir);
    let registry = Arc::new(RwLock::new(load_registry(&config)?));
    let prompts = Arc::new(load_prompts(&config)?);

    let bus = EventBus::new();
    // Storage handler goes first: storage must complete before the
    // dispatcher sees the same event (spec.md §4.3, §5).
    bus.subscribe(StorageHandler::new(library).into_handler());

    let llm = ProcessLlmInvoker::new(config.llm_binary.clone(), config.llm_args.clone());
    let scheduler = ActionScheduler::new(llm, SystemClock, prompts);
    let dispatcher = Dispatcher::new(registry, scheduler);
    let tick_handle = dispatcher.connect(&bus);

    let tail = Arc::new(JournalTail::new(&runtime_dir, &config.sources, config.journal_poll_interval));
    let (tail_shutdown_tx, tail_shutdown_rx) = tokio::sync::oneshot::channel();
    let tail_bus = bus.clone();
    let tail_for_task = tail.clone();
    let tail_handle = tokio::spawn(async move {
        tail_for_task.run_forever(tail_bus, tail_shutdown_rx).await;
    });

    tracing::info!(
        sources = ?config.sources,
        poll_interval_secs = config.journal_poll_interval.as_secs(),
        actions_manifest = %config.actions_manifest_path.display(),
        "hal9000d starting"
    );

    tokio::signal::ctrl_c().await.context("waiting for shutdown signal")?;
    tracing::info!("hal9000d received shutdown signal");

    dispatcher.stop();
    let _ = tail_shutdown_tx.send(());
    tick_handle.abort();
    let _ = tail_handle.await;
    bus.close();

    tracing::info!("hal9000d stopped");
    Ok(())
}

/// Load the action manifest, logging and continuing with an empty
/// registry if it is absent — an operator may not have declared any
/// actions yet, and this is not fatal the way a missing credential file
/// is for a watcher.
fn load_registry(config: &DispatcherConfig) -> anyhow::Result<ActionRegistry> {
    let mut registry = ActionRegistry::new();
    match std::fs::read_to_string(&config.actions_manifest_path) {
        Ok(yaml) => {
            let count = registry.load_manifest(&yaml)?;
            tracing::info!(count, path = %config.actions_manifest_path.display(), "loaded action manifest");
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %config.actions_manifest_path.display(), "no action manifest found, starting with an empty registry");
        }
        Err(e) => return Err(e).context("reading action manifest"),
    }
    Ok(registry)
}

fn load_prompts(config: &DispatcherConfig) -> anyhow::Result<PromptRegistry> {
    let mut prompts = PromptRegistry::new();
    let dirs: Vec<&std::path::Path> = config.prompt_dirs.iter().map(std::path::PathBuf::as_path).collect();
    let count = prompts.load_layers(&dirs)?;
    tracing::info!(count, dirs = ?config.prompt_dirs, "loaded prompt templates");
    Ok(prompts)
}

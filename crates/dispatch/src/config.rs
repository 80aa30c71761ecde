//! `hal9000d` configuration, loaded from environment variables with
//! defaults derived from the shared runtime directory — same shape as the
//! patrol daemon's and task scheduler's own `Config::load()`.

use std::path::PathBuf;
use std::time::Duration;

/// Watcher sources whose journals `hal9000d` tails by default, matching
/// the four watcher binaries spec.md §4.4 names.
pub const DEFAULT_SOURCES: &[&str] = &["calendar", "jira", "slack", "bamboo"];

#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub library_dir: PathBuf,
    pub actions_manifest_path: PathBuf,
    pub prompt_dirs: Vec<PathBuf>,
    pub sources: Vec<String>,
    pub journal_poll_interval: Duration,
    pub llm_binary: String,
    pub llm_args: Vec<String>,
}

impl DispatcherConfig {
    pub fn load() -> Self {
        let runtime = hal9000_watchers::runtime_dir::runtime_dir();
        Self {
            library_dir: env_path("HAL9000_LIBRARY_DIR", runtime.join("library")),
            actions_manifest_path: env_path("HAL9000_ACTIONS_MANIFEST", runtime.join("actions.yaml")),
            prompt_dirs: env_path_list("HAL9000_PROMPT_DIRS", vec![runtime.join("prompts")]),
            sources: env_list("HAL9000_DISPATCH_SOURCES", DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect()),
            journal_poll_interval: Duration::from_secs(env_u64("HAL9000_JOURNAL_POLL_SECS", 5)),
            llm_binary: std::env::var("HAL9000_LLM_BINARY").unwrap_or_else(|_| "llm".to_string()),
            llm_args: env_list("HAL9000_LLM_ARGS", Vec::new()),
        }
    }
}

fn env_path(var: &str, default: PathBuf) -> PathBuf {
    std::env::var(var).ok().map(PathBuf::from).unwrap_or(default)
}

fn env_u64(var: &str, default: u64) -> u64 {
    std::env::var(var).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Parse a colon-separated list of paths, later entries overriding
/// earlier ones when loaded into a [`hal9000_registry::PromptRegistry`]
/// (spec.md §9's "only supported configuration-override primitive").
fn env_path_list(var: &str, default: Vec<PathBuf>) -> Vec<PathBuf> {
    match std::env::var(var) {
        Ok(raw) => raw.split(':').filter(|s| !s.is_empty()).map(PathBuf::from).collect(),
        Err(_) => default,
    }
}

/// Parse a comma-separated list, falling back to `default` when unset.
fn env_list(var: &str, default: Vec<String>) -> Vec<String> {
    match std::env::var(var) {
        Ok(raw) => raw.split(',').filter(|s| !s.is_empty()).map(str::to_string).collect(),
        Err(_) => default,
    }
}

//! Supervisor configuration, loaded from environment variables with
//! defaults derived from the shared runtime directory.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SupervisorConfig {
    pub manifest_path: PathBuf,
    pub runtime_dir: PathBuf,
}

impl SupervisorConfig {
    pub fn load() -> Self {
        let runtime = hal9000_watchers::runtime_dir::runtime_dir();
        Self {
            manifest_path: env_path("HAL9000_SERVICES_MANIFEST", runtime.join("services.yaml")),
            runtime_dir: env_path("HAL9000_RUNTIME_DIR", runtime),
        }
    }
}

fn env_path(var: &str, default: PathBuf) -> PathBuf {
    std::env::var(var).ok().map(PathBuf::from).unwrap_or(default)
}

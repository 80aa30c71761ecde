//! Shared path resolution for the watcher binaries: `$HAL9000_RUNTIME_DIR`,
//! falling back to the platform state directory, mirroring the teacher's
//! `state_dir()` / `Config::load()` shape (one base dir, everything else
//! derived from it, no config file required to start).

use std::path::PathBuf;

pub fn runtime_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("HAL9000_RUNTIME_DIR") {
        return PathBuf::from(dir);
    }
    dirs::state_dir().or_else(dirs::data_local_dir).unwrap_or_else(std::env::temp_dir).join("hal9000")
}

pub fn credentials_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("HAL9000_CREDENTIALS_DIR") {
        return PathBuf::from(dir);
    }
    runtime_dir().join("credentials")
}

pub fn poll_interval_secs(env_var: &str, default_secs: u64) -> u64 {
    std::env::var(env_var).ok().and_then(|v| v.parse().ok()).unwrap_or(default_secs)
}

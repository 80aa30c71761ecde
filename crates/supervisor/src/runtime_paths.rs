//! Per-service PID and log file paths, both rooted in the shared runtime
//! directory, plus the signal-0 liveness probe also used by the task
//! scheduler's `pidfile` module.

use std::path::{Path, PathBuf};

pub fn pid_path(runtime_dir: &Path, service: &str) -> PathBuf {
    runtime_dir.join(format!("{service}.pid"))
}

pub fn log_path(runtime_dir: &Path, service: &str) -> PathBuf {
    runtime_dir.join(format!("{service}.log"))
}

pub fn read_pid(path: &Path) -> Option<i32> {
    std::fs::read_to_string(path).ok()?.trim().parse().ok()
}

pub fn write_pid(path: &Path, pid: u32) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, format!("{pid}\n"))
}

pub fn is_process_running(pid: i32) -> bool {
    nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid), None).is_ok()
}

/// Uptime derived from the PID file's modification time, per spec.
pub fn uptime(path: &Path) -> Option<std::time::Duration> {
    let metadata = std::fs::metadata(path).ok()?;
    let modified = metadata.modified().ok()?;
    modified.elapsed().ok()
}

#[cfg(test)]
#[path = "runtime_paths_tests.rs"]
mod tests;

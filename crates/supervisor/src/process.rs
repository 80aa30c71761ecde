//! Spawning and stopping supervised child processes.
//!
//! `unsafe_code` is forbidden workspace-wide, which rules out a
//! `pre_exec`-based `setsid()` double-fork. Spawned services are
//! detached into their own process group via the stable, safe
//! `process_group(0)` instead — see DESIGN.md's open-question entry on
//! the scheduler's identical tradeoff, which this mirrors.

use std::path::Path;
use std::time::Duration;

use crate::error::SupervisorError;
use crate::manifest::ServiceSpec;
use crate::runtime_paths;

/// Spawns `service`, redirecting stdout/stderr to `log_path`, and writes
/// its PID to `pid_path`. The child's own file descriptors keep the log
/// file open after this process exits, so no explicit reaper task is
/// needed to close it — the OS closes it when the child itself exits.
pub fn spawn(service: &ServiceSpec, pid_path: &Path, log_path: &Path) -> Result<u32, SupervisorError> {
    use std::os::unix::process::CommandExt;

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = std::fs::OpenOptions::new().create(true).append(true).open(log_path)?;
    let log_file_err = log_file.try_clone()?;

    let child = std::process::Command::new(&service.command)
        .args(&service.args)
        .process_group(0)
        .stdin(std::process::Stdio::null())
        .stdout(log_file)
        .stderr(log_file_err)
        .spawn()?;

    runtime_paths::write_pid(pid_path, child.id())?;
    Ok(child.id())
}

/// Sends SIGTERM and polls for up to `timeout` for the process to exit.
pub async fn stop(pid: i32, timeout: Duration) -> Result<(), SupervisorError> {
    nix::sys::signal::kill(nix::unistd::Pid::from_raw(pid), nix::sys::signal::Signal::SIGTERM).ok();

    let deadline = tokio::time::Instant::now() + timeout;
    while tokio::time::Instant::now() < deadline {
        if !runtime_paths::is_process_running(pid) {
            return Ok(());
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    Ok(())
}

/// Resolves `command` to a concrete file path: itself if absolute,
/// otherwise the first `PATH` entry containing it.
pub fn resolve_command(command: &str) -> Option<std::path::PathBuf> {
    let path = Path::new(command);
    if path.is_absolute() {
        return path.is_file().then(|| path.to_path_buf());
    }
    std::env::var_os("PATH")?
        .to_str()?
        .split(':')
        .map(|dir| Path::new(dir).join(command))
        .find(|candidate| candidate.is_file())
}

/// Whether `command` resolves to a path at all (absolute or on `PATH`).
pub fn command_resolves(command: &str) -> bool {
    resolve_command(command).is_some()
}

/// Whether `command` resolves AND the resolved file's executable bit is set.
pub fn command_is_executable(command: &str) -> bool {
    resolve_command(command).map(|p| is_executable_file(&p)).unwrap_or(false)
}

#[cfg(unix)]
fn is_executable_file(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0).unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable_file(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;

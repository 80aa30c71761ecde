//! Task registry and the shell-backed task implementation.
//!
//! A schedule entry names a task by a bare string; there is no embedded
//! command line. Tasks are discovered by scanning `tasks_dir` for
//! executable files and registering each by its file stem, the same way
//! the patrol daemon registers health checks and cleaners by name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;

use crate::error::SchedulerError;

#[derive(Debug, Clone)]
pub struct TaskOutcome {
    pub success: bool,
    pub message: String,
    pub output: String,
    pub duration_ms: u64,
}

#[async_trait]
pub trait Task: Send + Sync {
    fn name(&self) -> &str;
    async fn run(&self) -> TaskOutcome;
}

/// Shells out to an executable file, grounded on the shell crate's own
/// simple-command spawn: pipe stdout/stderr, wait for the full output.
pub struct ShellTask {
    name: String,
    path: PathBuf,
}

impl ShellTask {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self { name: name.into(), path: path.into() }
    }
}

#[async_trait]
impl Task for ShellTask {
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self) -> TaskOutcome {
        let start = Instant::now();
        let result = tokio::process::Command::new(&self.path)
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .output()
            .await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(output) => {
                let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
                combined.push_str(&String::from_utf8_lossy(&output.stderr));
                TaskOutcome {
                    success: output.status.success(),
                    message: match output.status.code() {
                        Some(code) => format!("exited with status {code}"),
                        None => "terminated by signal".to_string(),
                    },
                    output: combined,
                    duration_ms,
                }
            }
            Err(e) => TaskOutcome {
                success: false,
                message: format!("failed to spawn task: {e}"),
                output: String::new(),
                duration_ms,
            },
        }
    }
}

/// Scans `tasks_dir` for executable files and registers each by its file
/// stem. Non-executable and non-file entries are skipped.
pub fn discover_tasks(tasks_dir: &Path) -> Result<BTreeMap<String, Arc<dyn Task>>, SchedulerError> {
    let mut tasks: BTreeMap<String, Arc<dyn Task>> = BTreeMap::new();
    let entries = match std::fs::read_dir(tasks_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(tasks),
        Err(e) => return Err(e.into()),
    };
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() || !is_executable(&path) {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        tasks.insert(stem.to_string(), Arc::new(ShellTask::new(stem, path.clone())));
    }
    Ok(tasks)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).map(|m| m.permissions().mode() & 0o111 != 0).unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    true
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;

//! Append-only per-task execution journal, one JSON object per line.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use hal9000_core::ExecutionResult;

use crate::error::SchedulerError;

pub fn results_path(results_dir: &Path, task: &str) -> PathBuf {
    results_dir.join(format!("{task}.jsonl"))
}

pub fn append_result(results_dir: &Path, result: &ExecutionResult) -> Result<(), SchedulerError> {
    std::fs::create_dir_all(results_dir)?;
    let path = results_path(results_dir, &result.task);
    let mut file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;
    let line = serde_json::to_string(result)?;
    writeln!(file, "{line}")?;
    Ok(())
}

/// Reads the last `limit` results for `task`, oldest first.
pub fn tail_results(results_dir: &Path, task: &str, limit: usize) -> Result<Vec<ExecutionResult>, SchedulerError> {
    let path = results_path(results_dir, task);
    let contents = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    let mut lines: Vec<&str> = contents.lines().filter(|l| !l.is_empty()).collect();
    if lines.len() > limit {
        lines = lines.split_off(lines.len() - limit);
    }
    lines.iter().map(|line| serde_json::from_str(line).map_err(SchedulerError::from)).collect()
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod tests;

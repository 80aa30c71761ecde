//! Log tailing and the error-scan used by `diagnose`.

use std::path::Path;

const ERROR_MARKERS: [&str; 4] = ["error", "fatal", "panic", "failed"];

/// The last `n` lines of the log at `path`, oldest first. Missing files
/// yield an empty tail rather than an error — a service that has never
/// logged anything is not a failure.
pub fn tail(path: &Path, n: usize) -> Vec<String> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return Vec::new(),
    };
    let mut lines: Vec<String> = contents.lines().map(str::to_string).collect();
    if lines.len() > n {
        lines = lines.split_off(lines.len() - n);
    }
    lines
}

/// Scans the last 20 lines for `error|fatal|panic|failed` (case
/// insensitive), returning up to the 5 most recent matches.
pub fn scan_for_errors(path: &Path) -> Vec<String> {
    tail(path, 20)
        .into_iter()
        .filter(|line| {
            let lower = line.to_lowercase();
            ERROR_MARKERS.iter().any(|marker| lower.contains(marker))
        })
        .rev()
        .take(5)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect()
}

#[cfg(test)]
#[path = "logs_tests.rs"]
mod tests;

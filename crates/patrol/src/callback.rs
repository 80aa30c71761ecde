//! File-based callback inbox, drained into an internal queue and handed
//! to a handler looked up by `source`. Grounded on the teacher's
//! registered-handler-by-name pattern (`custom_handlers: action_name ->
//! handler` in the dispatcher).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::PatrolError;

/// One callback enqueued either programmatically or via `callback_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Callback {
    pub source: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

#[async_trait]
pub trait CallbackHandler: Send + Sync + 'static {
    async fn handle(&self, callback: &Callback) -> Result<(), PatrolError>;
}

/// Scan `dir` for `*.json` files, parse each into a `Callback`, and return
/// the ones that parsed. A file that parses is deleted; a file that
/// doesn't is left in place (a file surviving a cycle indicates a parse
/// failure, logged by the caller but never fatal).
pub fn drain_callback_dir(dir: &Path) -> Vec<Callback> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(?dir, error = %e, "failed to scan callback_dir");
            return Vec::new();
        }
    };

    let mut drained = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Callback>(&contents) {
                Ok(callback) => {
                    if let Err(e) = std::fs::remove_file(&path) {
                        tracing::warn!(?path, error = %e, "failed to remove drained callback file");
                    }
                    drained.push(callback);
                }
                Err(e) => {
                    tracing::warn!(?path, error = %e, "callback file failed to parse, leaving in place");
                }
            },
            Err(e) => {
                tracing::warn!(?path, error = %e, "failed to read callback file");
            }
        }
    }
    drained
}

#[cfg(test)]
#[path = "callback_tests.rs"]
mod tests;

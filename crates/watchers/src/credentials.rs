//! Credential loading: a flat JSON object at a well-known per-source path,
//! validated fail-fast for a watcher's required fields (spec.md §4.4 step
//! 1), in the style of the teacher's adapter credential resolution.

use crate::error::WatcherError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Credentials {
    fields: BTreeMap<String, String>,
}

impl Credentials {
    /// Read `path` as a flat JSON object of string fields. A missing file
    /// is itself a fail-fast error — there is no "empty credentials"
    /// state, unlike `FloydState`.
    pub fn load(path: &Path) -> Result<Self, WatcherError> {
        let bytes = std::fs::read(path)?;
        let value: Value = serde_json::from_slice(&bytes)?;
        let object = value.as_object().cloned().unwrap_or_default();
        let fields = object
            .into_iter()
            .filter_map(|(k, v)| v.as_str().map(|s| (k, s.to_string())))
            .collect();
        Ok(Self { fields })
    }

    /// Fetch a required field, failing fast with a descriptive error if it
    /// is absent or empty.
    pub fn require(&self, key: &str) -> Result<&str, WatcherError> {
        match self.fields.get(key) {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(WatcherError::MissingCredential(key.to_string())),
        }
    }

    /// Validate every field in `keys` is present, without needing the
    /// values yet — used at startup so a watcher fails before its first
    /// poll rather than mid-cycle.
    pub fn require_all(&self, keys: &[&str]) -> Result<(), WatcherError> {
        for key in keys {
            self.require(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod tests;

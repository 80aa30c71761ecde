//! YAML action manifest shape (spec.md §4.5, §6):
//! `{actions: {name: {enabled, event_type, fetch: [..], prompt, action_type, metadata}}}`.

use hal9000_core::{Action, ActionKind};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub actions: BTreeMap<String, ManifestEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ManifestEntry {
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub event_type: String,
    #[serde(default)]
    pub fetch: Vec<String>,
    pub prompt: String,
    pub action_type: ActionKind,
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

fn default_true() -> bool {
    true
}

impl ManifestEntry {
    pub fn into_action(self, name: String) -> Action {
        Action {
            name,
            event_type: self.event_type,
            enabled: self.enabled,
            fetchers: self.fetch,
            prompt_template_name: self.prompt,
            kind: self.action_type,
            metadata: self.metadata,
        }
    }
}

/// Parse a manifest, skipping (and logging) any entry that fails to
/// deserialize rather than failing the whole load — spec.md §7's "Config
/// parse failure: partial — skip bad entry, log."
pub fn parse_manifest(yaml: &str) -> Result<Vec<Action>, crate::RegistryError> {
    let raw: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    let actions_value = raw.get("actions").cloned().unwrap_or(serde_yaml::Value::Null);
    let map = match actions_value.as_mapping() {
        Some(m) => m.clone(),
        None => return Ok(Vec::new()),
    };

    let mut out = Vec::new();
    for (key, value) in map {
        let name = match key.as_str() {
            Some(s) => s.to_string(),
            None => continue,
        };
        match serde_yaml::from_value::<ManifestEntry>(value) {
            Ok(entry) => out.push(entry.into_action(name)),
            Err(e) => {
                tracing::warn!(action = %name, error = %e, "skipping malformed action manifest entry");
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;

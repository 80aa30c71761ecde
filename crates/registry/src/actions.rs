//! The action registry: `action_name → Action`, plus a secondary
//! `event_type → [Action]` index supporting suffix-wildcard matches
//! (spec.md §4.5).

use crate::error::RegistryError;
use crate::manifest::parse_manifest;
use hal9000_core::Action;
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
pub struct ActionRegistry {
    by_name: BTreeMap<String, Action>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) an action at runtime.
    pub fn register(&mut self, action: Action) {
        self.by_name.insert(action.name.clone(), action);
    }

    pub fn get(&self, name: &str) -> Option<&Action> {
        self.by_name.get(name)
    }

    /// Load a YAML manifest, registering every entry that parsed
    /// successfully (bad entries are skipped and logged — see
    /// [`parse_manifest`]).
    pub fn load_manifest(&mut self, yaml: &str) -> Result<usize, RegistryError> {
        let actions = parse_manifest(yaml)?;
        let count = actions.len();
        for action in actions {
            self.register(action);
        }
        Ok(count)
    }

    /// Direct hits (exact `event_type` match) plus suffix-wildcard
    /// matches: an action registered with `event_type == "p:*"` matches
    /// any query of the shape `"p:<suffix>"`. A bare `"*"` pattern never
    /// matches anything.
    pub fn actions_for(&self, event_type: &str) -> Vec<&Action> {
        let mut out = Vec::new();
        for action in self.by_name.values() {
            if action.event_type == event_type {
                out.push(action);
                continue;
            }
            if let Some(prefix) = action.event_type.strip_suffix(":*") {
                if !prefix.is_empty() && event_type.starts_with(&format!("{prefix}:")) {
                    out.push(action);
                }
            }
        }
        out
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[cfg(test)]
#[path = "actions_tests.rs"]
mod tests;

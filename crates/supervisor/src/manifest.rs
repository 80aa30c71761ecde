//! The services manifest: a declarative YAML list of child processes the
//! supervisor knows how to start, stop, and inspect. Generalized off the
//! same "parse, then look things up by name" shape `hal9000-registry`
//! uses for the action manifest.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SupervisorError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSpec {
    pub name: String,
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServicesManifest {
    #[serde(default)]
    pub services: Vec<ServiceSpec>,
}

impl ServicesManifest {
    pub fn load(path: &Path) -> Result<Self, SupervisorError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(serde_yaml::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn find(&self, name: &str) -> Result<&ServiceSpec, SupervisorError> {
        self.services.iter().find(|s| s.name == name).ok_or_else(|| SupervisorError::UnknownService(name.to_string()))
    }
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;

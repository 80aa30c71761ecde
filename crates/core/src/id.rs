//! Entity id parsing and raw-event filename sanitization.

use std::fmt;

/// A validated `"<type>/<name>"` entity id.
///
/// Both segments are restricted to `[a-z0-9_-]` per spec.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId {
    ty: String,
    name: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidId {
    #[error("entity id must be of the form <type>/<name>: {0:?}")]
    MissingSeparator(String),
    #[error("entity id segment contains characters outside [a-z0-9_-]: {0:?}")]
    IllegalCharacters(String),
}

fn is_legal_segment(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
}

impl EntityId {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Result<Self, InvalidId> {
        let ty = ty.into();
        let name = name.into();
        if !is_legal_segment(&ty) || !is_legal_segment(&name) {
            return Err(InvalidId::IllegalCharacters(format!("{ty}/{name}")));
        }
        Ok(Self { ty, name })
    }

    pub fn ty(&self) -> &str {
        &self.ty
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.ty, self.name)
    }
}

impl std::str::FromStr for EntityId {
    type Err = InvalidId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ty, name) =
            s.split_once('/').ok_or_else(|| InvalidId::MissingSeparator(s.to_string()))?;
        Self::new(ty, name)
    }
}

impl TryFrom<String> for EntityId {
    type Error = InvalidId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EntityId> for String {
    fn from(value: EntityId) -> Self {
        value.to_string()
    }
}

/// Replace any character outside `[A-Za-z0-9_-]` with `_`.
///
/// Idempotent: `sanitize(sanitize(s)) == sanitize(s)`, since the
/// replacement character `_` is itself already legal.
pub fn sanitize_filename(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
        .collect()
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;

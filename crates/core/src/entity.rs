//! The library's unit of storage: a typed record with content and links.

use crate::id::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A single outgoing link from one entity to another.
///
/// Edges carry semantics but impose no referential-integrity requirement
/// at write time — `to` may point at an entity that does not (yet, or
/// ever) exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub to: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// A typed record with content and links, identified by `<type>/<name>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    #[serde(rename = "type")]
    pub ty: String,
    pub content: BTreeMap<String, Value>,
    #[serde(default)]
    pub links: Vec<Edge>,
    pub modified: DateTime<Utc>,
    pub path: PathBuf,
}

impl Entity {
    pub fn new(
        id: &EntityId,
        content: BTreeMap<String, Value>,
        links: Vec<Edge>,
        modified: DateTime<Utc>,
        path: PathBuf,
    ) -> Self {
        Self {
            id: id.to_string(),
            ty: id.ty().to_string(),
            content,
            links,
            modified,
            path,
        }
    }

    /// A canonical serialization used by `query`'s substring filter: the
    /// entity id plus its content, sorted by key (BTreeMap already sorts),
    /// so the same content always serializes identically.
    pub fn canonical_text(&self) -> String {
        let mut out = self.id.clone();
        out.push('\n');
        if let Ok(json) = serde_json::to_string(&self.content) {
            out.push_str(&json);
        }
        out
    }
}

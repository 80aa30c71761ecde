//! Watcher output (`RawEvent`) and the bus envelope (`StorageEvent`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// The stage tag on a raw event. Always `"raw"` at the watcher layer;
/// kept as an enum (rather than a bare string) so a future stage can be
/// added without touching every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Raw,
}

crate::simple_display! {
    Stage {
        Raw => "raw",
    }
}

/// A watcher's output before it is matched to any action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    pub source: String,
    pub event_id: String,
    pub fetched_at: DateTime<Utc>,
    pub stage: Stage,
    pub data: BTreeMap<String, Value>,
}

impl RawEvent {
    pub fn new(source: impl Into<String>, event_id: impl Into<String>, fetched_at: DateTime<Utc>, data: BTreeMap<String, Value>) -> Self {
        Self { source: source.into(), event_id: event_id.into(), fetched_at, stage: Stage::Raw, data }
    }

    /// The `_meta`-wrapped object shape documented in spec.md §6: a
    /// top-level object with a `_meta` block and the source fields
    /// merged in at the same level.
    pub fn to_file_json(&self, category: &str) -> Value {
        let mut obj = serde_json::Map::new();
        obj.insert(
            "_meta".to_string(),
            serde_json::json!({
                "source": self.source,
                "fetched_at": self.fetched_at.to_rfc3339(),
                "event_id": self.event_id,
                "stage": self.stage.to_string(),
                "category": category,
            }),
        );
        for (k, v) in &self.data {
            obj.insert(k.clone(), v.clone());
        }
        Value::Object(obj)
    }
}

/// Whether a `StorageEvent` asks the storage handler to write, remove, or
/// do nothing to the library. `RemovedFromWatch` exists for sources (the
/// issue tracker) where a missing result is ambiguous — it may mean
/// out-of-query-scope rather than deleted — so the storage handler leaves
/// the library untouched but the dispatcher still sees the event and can
/// match actions against it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageEventKind {
    Store,
    Delete,
    RemovedFromWatch,
}

/// The bus envelope: what a watcher (or any producer) publishes, and what
/// the dispatcher reads back off the same publish call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageEvent {
    #[serde(rename = "type")]
    pub kind: StorageEventKind,
    pub source: String,
    pub event_id: String,
    pub fetched_at: DateTime<Utc>,
    pub category: String,
    pub data: BTreeMap<String, Value>,
}

impl StorageEvent {
    pub fn store(raw: &RawEvent, category: impl Into<String>) -> Self {
        Self {
            kind: StorageEventKind::Store,
            source: raw.source.clone(),
            event_id: raw.event_id.clone(),
            fetched_at: raw.fetched_at,
            category: category.into(),
            data: raw.data.clone(),
        }
    }

    pub fn delete(source: impl Into<String>, event_id: impl Into<String>, category: impl Into<String>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            kind: StorageEventKind::Delete,
            source: source.into(),
            event_id: event_id.into(),
            fetched_at,
            category: category.into(),
            data: BTreeMap::new(),
        }
    }

    /// A missing item that should not be deleted from the library (spec.md
    /// §4.4, §9): the dispatcher may still match actions against it.
    pub fn removed_from_watch(source: impl Into<String>, event_id: impl Into<String>, category: impl Into<String>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            kind: StorageEventKind::RemovedFromWatch,
            source: source.into(),
            event_id: event_id.into(),
            fetched_at,
            category: category.into(),
            data: BTreeMap::new(),
        }
    }

    /// `"<source>:<event_id>"`-style event type used for action matching;
    /// the registry matches `"<source>:*"` against this.
    pub fn event_type(&self) -> String {
        format!("{}:{}", self.source, self.event_id)
    }
}

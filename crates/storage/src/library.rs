//! The content-addressed entity store (spec.md §4.1).

use crate::edges;
use crate::error::LibraryError;
use chrono::{DateTime, Utc};
use hal9000_core::{Edge, Entity, EntityId};
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Direction for `get_linked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Out,
    In,
}

/// Filter/limit parameters for `query`.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pub ty: Option<String>,
    pub contains: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

/// The library store. Reads are lock-free; writes take a process-wide
/// exclusive lock so two `store`/`delete` calls never interleave.
///
/// Readers may observe a momentarily-inconsistent edge index (recomputed
/// from the entity file when absent) — that's an accepted tradeoff, not a
/// bug, per spec.md §4.1's concurrency note.
#[derive(Clone)]
pub struct Library {
    base: PathBuf,
    write_lock: Arc<RwLock<()>>,
}

fn entity_path(base: &Path, id: &EntityId) -> PathBuf {
    base.join(id.ty()).join(format!("{}.json", id.name()))
}

impl Library {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into(), write_lock: Arc::new(RwLock::new(())) }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn store(
        &self,
        ty: &str,
        name: &str,
        content: BTreeMap<String, Value>,
        links: Vec<Edge>,
    ) -> Result<Entity, LibraryError> {
        let id = EntityId::new(ty, name)?;
        let _guard = self.write_lock.write();

        let path = entity_path(&self.base, &id);
        let entity = Entity::new(&id, content, links.clone(), Utc::now(), path.clone());

        let bytes = serde_json::to_vec_pretty(&entity)?;
        crate::atomic::write_atomic(&path, &bytes)?;
        edges::write_index(&self.base, &id, &links)?;

        Ok(entity)
    }

    pub fn get(&self, id: &str) -> Result<Entity, LibraryError> {
        let id: EntityId = id.parse()?;
        let path = entity_path(&self.base, &id);
        let bytes = std::fs::read(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LibraryError::NotFound(id.to_string())
            } else {
                LibraryError::Io(e)
            }
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub fn delete(&self, id: &str) -> Result<(), LibraryError> {
        let id: EntityId = id.parse()?;
        let _guard = self.write_lock.write();

        let path = entity_path(&self.base, &id);
        let entity_existed = match std::fs::remove_file(&path) {
            Ok(()) => true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => return Err(e.into()),
        };
        let index_existed = edges::remove_index(&self.base, &id)?;

        if !entity_existed && !index_existed {
            return Err(LibraryError::NotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn list_types(&self) -> Result<Vec<String>, LibraryError> {
        if !self.base.exists() {
            return Ok(Vec::new());
        }
        let mut types = Vec::new();
        for entry in std::fs::read_dir(&self.base)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == ".index" {
                continue;
            }
            types.push(name);
        }
        types.sort();
        Ok(types)
    }

    pub fn query(&self, params: QueryParams) -> Result<Vec<Entity>, LibraryError> {
        let types = match &params.ty {
            Some(ty) => vec![ty.clone()],
            None => self.list_types()?,
        };

        let mut out = Vec::new();
        for ty in types {
            let dir = self.base.join(&ty);
            if !dir.exists() {
                continue;
            }
            for entry in std::fs::read_dir(&dir)? {
                let entry = entry?;
                let path = entry.path();
                if path.extension().and_then(|e| e.to_str()) != Some("json") {
                    continue;
                }
                let bytes = std::fs::read(&path)?;
                let entity: Entity = serde_json::from_slice(&bytes)?;

                if let Some(since) = params.since {
                    if entity.modified < since {
                        continue;
                    }
                }
                if let Some(needle) = &params.contains {
                    if !entity.canonical_text().contains(needle.as_str()) {
                        continue;
                    }
                }
                out.push(entity);
            }
        }

        out.sort_by(|a, b| b.modified.cmp(&a.modified));
        if let Some(limit) = params.limit {
            out.truncate(limit);
        }
        Ok(out)
    }

    pub fn get_linked(&self, id: &str, direction: Direction) -> Result<Vec<Entity>, LibraryError> {
        let parsed: EntityId = id.parse()?;
        match direction {
            Direction::Out => {
                let links = match edges::read_index(&self.base, &parsed)? {
                    Some(links) => links,
                    None => {
                        // Edge index absent (crash between writes): recompute
                        // from the entity file, which is authoritative.
                        match self.get(id) {
                            Ok(entity) => entity.links,
                            Err(LibraryError::NotFound(_)) => Vec::new(),
                            Err(e) => return Err(e),
                        }
                    }
                };
                let mut out = Vec::new();
                for edge in links {
                    if let Ok(entity) = self.get(&edge.to) {
                        out.push(entity);
                    }
                }
                Ok(out)
            }
            Direction::In => {
                let mut out = Vec::new();
                for (owner_id, links) in edges::walk_all(&self.base)? {
                    if links.iter().any(|l| l.to == id) {
                        if let Ok(entity) = self.get(&owner_id) {
                            out.push(entity);
                        }
                    }
                }
                Ok(out)
            }
        }
    }
}

#[cfg(test)]
#[path = "library_tests.rs"]
mod tests;

//! Outgoing-edge index: `<base>/.index/edges/<type>/<name>.json`.
//!
//! Invariant: for each entity `E`, `edges/<E>.json` equals the `links`
//! field at the moment of the last write to `E`. A crash between the
//! entity write and the index write is tolerated: the entity file is
//! authoritative, and the index is recomputed on read when absent.

use crate::atomic::write_atomic;
use crate::error::LibraryError;
use hal9000_core::{Edge, EntityId};
use std::path::{Path, PathBuf};

pub fn index_path(base: &Path, id: &EntityId) -> PathBuf {
    base.join(".index").join("edges").join(id.ty()).join(format!("{}.json", id.name()))
}

pub fn write_index(base: &Path, id: &EntityId, links: &[Edge]) -> Result<(), LibraryError> {
    let path = index_path(base, id);
    let bytes = serde_json::to_vec_pretty(links)?;
    write_atomic(&path, &bytes)?;
    Ok(())
}

pub fn read_index(base: &Path, id: &EntityId) -> Result<Option<Vec<Edge>>, LibraryError> {
    let path = index_path(base, id);
    match std::fs::read(&path) {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn remove_index(base: &Path, id: &EntityId) -> Result<bool, LibraryError> {
    let path = index_path(base, id);
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Walk every per-type edge-index directory under `base`, yielding
/// `(owner_id, links)` pairs. Used by `get_linked(.., in)`.
pub fn walk_all(base: &Path) -> Result<Vec<(String, Vec<Edge>)>, LibraryError> {
    let mut out = Vec::new();
    let root = base.join(".index").join("edges");
    if !root.exists() {
        return Ok(out);
    }
    for ty_entry in std::fs::read_dir(&root)? {
        let ty_entry = ty_entry?;
        if !ty_entry.file_type()?.is_dir() {
            continue;
        }
        let ty = ty_entry.file_name().to_string_lossy().into_owned();
        for file_entry in std::fs::read_dir(ty_entry.path())? {
            let file_entry = file_entry?;
            let path = file_entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let name = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
            let bytes = std::fs::read(&path)?;
            let links: Vec<Edge> = serde_json::from_slice(&bytes)?;
            out.push((format!("{ty}/{name}"), links));
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "edges_tests.rs"]
mod tests;

//! Write-then-rename durability primitive shared by the entity store, the
//! edge index, and the raw-event library.

use std::io::Write;
use std::path::Path;

/// Write `bytes` to `path` atomically: write to a sibling temp file, then
/// rename over the destination. A crash mid-write leaves the previous
/// contents (or nothing, on first write) intact, never a half-written file.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
#[path = "atomic_tests.rs"]
mod tests;

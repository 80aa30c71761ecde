//! The per-watcher journal: an append-only JSON-lines file that is the
//! cross-process handoff to the dispatcher (spec.md §4.4 step 6, §5: "the
//! file is append-only, reader tracks byte offset").

use crate::error::WatcherError;
use hal9000_core::StorageEvent;
use std::fs::OpenOptions;
use std::io::{BufRead, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

pub fn journal_path(runtime_dir: &Path, source: &str) -> PathBuf {
    runtime_dir.join(format!("{source}-events.jsonl"))
}

/// Appends one `StorageEvent` per line. Events for a single tick are
/// written in classification order; nothing is ever rewritten in place.
pub struct JournalWriter {
    path: PathBuf,
}

impl JournalWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn append(&self, events: &[StorageEvent]) -> Result<(), WatcherError> {
        if events.is_empty() {
            return Ok(());
        }
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        for event in events {
            let mut line = serde_json::to_vec(event)?;
            line.push(b'\n');
            file.write_all(&line)?;
        }
        file.sync_all()?;
        Ok(())
    }
}

/// Reads new lines appended since the last call, persisting a byte offset
/// so a restart (offset reset to 0) only causes harmless re-delivery —
/// handlers downstream are idempotent per spec.md §9.
pub struct JournalReader {
    path: PathBuf,
    offset_path: PathBuf,
}

impl JournalReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let offset_path = path.with_extension("offset");
        Self { path, offset_path }
    }

    fn load_offset(&self) -> u64 {
        std::fs::read_to_string(&self.offset_path).ok().and_then(|s| s.trim().parse().ok()).unwrap_or(0)
    }

    fn save_offset(&self, offset: u64) -> Result<(), WatcherError> {
        if let Some(dir) = self.offset_path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.offset_path, offset.to_string())?;
        Ok(())
    }

    /// Read every complete line appended since the last persisted offset,
    /// in file order, then persist the new offset. A trailing partial
    /// line (a writer caught mid-append) is left for the next read.
    pub fn read_new(&self) -> Result<Vec<StorageEvent>, WatcherError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut file = std::fs::File::open(&self.path)?;
        let len = file.metadata()?.len();
        let mut offset = self.load_offset();
        if offset > len {
            offset = 0; // journal was truncated/rotated underneath us
        }
        file.seek(SeekFrom::Start(offset))?;
        let mut buf = Vec::new();
        file.read_to_end(&mut buf)?;

        let mut events = Vec::new();
        let mut consumed = 0usize;
        for line in buf.split_inclusive(|&b| b == b'\n') {
            if line.last() != Some(&b'\n') {
                break; // partial trailing line, not yet consumed
            }
            consumed += line.len();
            let line = &line[..line.len() - 1];
            if line.is_empty() {
                continue;
            }
            events.push(serde_json::from_slice(line)?);
        }

        self.save_offset(offset + consumed as u64)?;
        Ok(events)
    }
}

/// Helper mirroring [`JournalReader::read_new`] without persisting an
/// offset, for tools that just want to dump a journal's full contents.
pub fn read_all(path: &Path) -> Result<Vec<StorageEvent>, WatcherError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);
    let mut out = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        out.push(serde_json::from_str(&line)?);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "journal_tests.rs"]
mod tests;

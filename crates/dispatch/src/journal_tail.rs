//! Tails each watcher's on-disk journal and republishes its events onto
//! this process's in-process bus.
//!
//! Watchers and the dispatcher live in separate OS processes (spec.md
//! §4.4 step 6, §5), so the journal file is the cross-process handoff;
//! the bus is purely intra-process. This is the seam between the two:
//! one `JournalReader` per source, polled on an interval, each new event
//! handed to [`hal9000_bus::EventBus::publish`] in file order.

use hal9000_bus::EventBus;
use hal9000_watchers::journal::journal_path;
use hal9000_watchers::JournalReader;
use std::path::Path;
use std::time::Duration;

pub struct JournalTail {
    readers: Vec<(String, JournalReader)>,
    interval: Duration,
}

impl JournalTail {
    pub fn new(runtime_dir: &Path, sources: &[String], interval: Duration) -> Self {
        let readers = sources.iter().map(|source| (source.clone(), JournalReader::new(journal_path(runtime_dir, source)))).collect();
        Self { readers, interval }
    }

    /// Read every journal once and publish new events onto `bus`, in
    /// each journal's file order. A read error on one source is logged
    /// and skipped, not fatal to the others (matches watchers' own
    /// "transient errors don't self-exit" contract).
    pub fn poll_once(&self, bus: &EventBus) -> usize {
        let mut total = 0;
        for (source, reader) in &self.readers {
            match reader.read_new() {
                Ok(events) => {
                    for event in &events {
                        if let Err(e) = bus.publish(event) {
                            tracing::warn!(source = %source, error = %e, "bus publish failed for tailed journal event");
                        }
                    }
                    total += events.len();
                }
                Err(e) => {
                    tracing::warn!(source = %source, error = %e, "failed to read watcher journal, retrying next poll");
                }
            }
        }
        total
    }

    /// Poll on `self.interval` until `shutdown` resolves.
    pub async fn run_forever(&self, bus: EventBus, mut shutdown: tokio::sync::oneshot::Receiver<()>) {
        loop {
            self.poll_once(&bus);
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {}
                _ = &mut shutdown => break,
            }
        }
    }
}

#[cfg(test)]
#[path = "journal_tail_tests.rs"]
mod tests;

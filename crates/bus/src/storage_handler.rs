//! The canonical bus subscriber: materializes bus events onto the
//! library store (spec.md §4.3).

use crate::error::BusError;
use crate::event_bus::{Handler, HandlerResult};
use hal9000_core::{RawEvent, StorageEventKind};
use hal9000_storage::{raw_events, Library};
use std::sync::Arc;

/// Wraps a shared [`Library`] handle so `Store`/`Delete` bus events are
/// written straight through to the raw-event library.
#[derive(Clone)]
pub struct StorageHandler {
    library: Library,
}

impl StorageHandler {
    pub fn new(library: Library) -> Self {
        Self { library }
    }

    pub fn handle(&self, event: &hal9000_core::StorageEvent) -> HandlerResult {
        match event.kind {
            StorageEventKind::Store => {
                let raw = RawEvent::new(event.source.clone(), event.event_id.clone(), event.fetched_at, event.data.clone());
                let path = raw_events::store(self.library.base(), &event.category, &raw).map_err(BusError::from)?;
                Ok(Some(path))
            }
            StorageEventKind::Delete => {
                raw_events::delete(self.library.base(), &event.category, &event.event_id).map_err(BusError::from)?;
                Ok(None)
            }
            // Ambiguous absence (e.g. an issue falling out of a JQL
            // window): leave the library untouched, let downstream
            // subscribers (the dispatcher) still see the event.
            StorageEventKind::RemovedFromWatch => Ok(None),
        }
    }

    /// Build a bus [`Handler`] closure from this handler.
    pub fn into_handler(self) -> Handler {
        Arc::new(move |event| self.handle(event))
    }
}

#[cfg(test)]
#[path = "storage_handler_tests.rs"]
mod tests;

//! A single-process, single-thread-safe pub/sub structure (spec.md §4.2).
//!
//! `publish` invokes handlers sequentially, in registration order, under a
//! read lock; the last handler's result is returned. `subscribe` takes a
//! write lock. Events are never buffered or reordered: the synchronous
//! contract means a publish returning success implies all subscribers
//! completed — there is no separate barrier to wait on.

use crate::error::BusError;
use hal9000_core::StorageEvent;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub type HandlerResult = Result<Option<PathBuf>, BusError>;
pub type Handler = Arc<dyn Fn(&StorageEvent) -> HandlerResult + Send + Sync>;

#[derive(Clone, Default)]
pub struct EventBus {
    handlers: Arc<RwLock<Vec<Handler>>>,
    closed: Arc<AtomicBool>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. The storage handler should be registered first
    /// so storage completes before the dispatcher sees the same event.
    pub fn subscribe(&self, handler: Handler) {
        self.handlers.write().push(handler);
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Invoke every subscriber in registration order. Returns the last
    /// handler's result (`Ok(None)` if there were no handlers, or if the
    /// bus is closed — `publish` on a closed bus is a no-op).
    pub fn publish(&self, event: &StorageEvent) -> HandlerResult {
        if self.is_closed() {
            return Ok(None);
        }

        let handlers = self.handlers.read();
        let mut last = Ok(None);
        for handler in handlers.iter() {
            let result = handler(event);
            if let Err(ref e) = result {
                tracing::warn!(error = %e, source = %event.source, event_id = %event.event_id, "bus handler failed");
            }
            last = result;
        }
        last
    }
}

#[cfg(test)]
#[path = "event_bus_tests.rs"]
mod tests;

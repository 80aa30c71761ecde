//! Clock abstraction for testable wall-clock time handling.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::sync::Arc;

/// A source of wall-clock time, injected everywhere a component would
/// otherwise call `Utc::now()` directly, so watcher polls, patrol cycles
/// and scheduler ticks stay deterministically testable.
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// Real system clock.
#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fake clock for tests, with controllable, monotonically-advanced time.
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<DateTime<Utc>>>,
}

impl FakeClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self { current: Arc::new(Mutex::new(start)) }
    }

    pub fn advance(&self, duration: chrono::Duration) {
        *self.current.lock() += duration;
    }

    pub fn set(&self, at: DateTime<Utc>) {
        *self.current.lock() = at;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new(DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default())
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock()
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;

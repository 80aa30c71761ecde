//! The override point for an action's execution body (spec.md §4.7: "the
//! default handler loads the referenced prompt template ... and calls
//! scheduler.Execute"). A registered [`CustomHandler`] replaces that
//! default body while keeping the scheduler's kind-based dispatch
//! (immediate/delayed/batched) the same for every action.

use async_trait::async_trait;
use hal9000_core::{Action, StorageEvent};

#[async_trait]
pub trait CustomHandler: Send + Sync {
    async fn handle(&self, event: &StorageEvent, action: &Action);
}

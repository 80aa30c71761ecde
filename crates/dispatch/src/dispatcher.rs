//! The dispatcher: matches bus events to registered actions and hands
//! them to the scheduler, or to a custom handler when one is registered
//! for the action's name (spec.md §4.7).

use crate::handler::CustomHandler;
use crate::llm::LlmInvoker;
use crate::scheduler::ActionScheduler;
use hal9000_bus::{EventBus, Handler};
use hal9000_core::{Action, Clock, StorageEvent};
use hal9000_registry::ActionRegistry;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone)]
pub struct Dispatcher<L: LlmInvoker, C: Clock> {
    registry: Arc<RwLock<ActionRegistry>>,
    scheduler: ActionScheduler<L, C>,
    custom_handlers: Arc<RwLock<BTreeMap<String, Arc<dyn CustomHandler>>>>,
    running: Arc<AtomicBool>,
}

impl<L: LlmInvoker, C: Clock> Dispatcher<L, C> {
    pub fn new(registry: Arc<RwLock<ActionRegistry>>, scheduler: ActionScheduler<L, C>) -> Self {
        Self { registry, scheduler, custom_handlers: Arc::new(RwLock::new(BTreeMap::new())), running: Arc::new(AtomicBool::new(false)) }
    }

    /// Register a custom handler, overriding the default template+LLM
    /// behavior for every action named `action_name`.
    pub fn register_handler(&self, action_name: impl Into<String>, handler: Arc<dyn CustomHandler>) {
        self.custom_handlers.write().insert(action_name.into(), handler);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Subscribe this dispatcher's matching logic onto `bus`, and spawn
    /// the scheduler's background tick loop. Returns the tick loop's
    /// join handle so the caller can abort it on shutdown.
    pub fn connect(&self, bus: &EventBus) -> tokio::task::JoinHandle<()> {
        self.running.store(true, Ordering::SeqCst);
        bus.subscribe(self.as_handler());
        self.scheduler.spawn_tick_loop()
    }

    /// `Stop()` per spec.md §4.7: flips `running` to false. In-flight
    /// handlers (already-spawned detached tasks) are left to drain on
    /// their own; this call does not wait for them.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    fn as_handler(&self) -> Handler {
        let dispatcher = self.clone();
        Arc::new(move |event: &StorageEvent| {
            dispatcher.dispatch(event.clone());
            Ok(None)
        })
    }

    /// Two-step lookup (`"<source>:*"` then bare `source`), filtered to
    /// `enabled`, fanned out one detached task per matched action.
    fn dispatch(&self, event: StorageEvent) {
        if !self.is_running() {
            return;
        }

        let wildcard_query = format!("{}:*", event.source);
        let registry = self.registry.read();
        let mut matches: Vec<Action> = registry.actions_for(&wildcard_query).into_iter().filter(|a| a.enabled).cloned().collect();
        if matches.is_empty() {
            matches = registry.actions_for(&event.source).into_iter().filter(|a| a.enabled).cloned().collect();
        }
        drop(registry);

        for action in matches {
            let dispatcher = self.clone();
            let event = event.clone();
            tokio::spawn(async move {
                dispatcher.dispatch_action(event, action).await;
            });
        }
    }

    async fn dispatch_action(&self, event: StorageEvent, action: Action) {
        let custom = self.custom_handlers.read().get(&action.name).cloned();
        self.scheduler.schedule(event, action, custom);
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;

//! The action scheduler: immediate/delayed/batched dispatch of matched
//! actions, and the `execute` pipeline that expands a prompt template and
//! invokes the LLM CLI (spec.md §4.6).

use crate::error::DispatchError;
use crate::handler::CustomHandler;
use crate::llm::LlmInvoker;
use chrono::{DateTime, Utc};
use hal9000_core::{Action, Clock, StorageEvent};
use hal9000_registry::{expand, PromptRegistry};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// One queued/tracked action, paired with the handler that should run it
/// (the default template+LLM body, or a registered override).
#[derive(Clone)]
struct Pending {
    event: StorageEvent,
    action: Action,
    execute_at: Option<DateTime<Utc>>,
    handler: Option<Arc<dyn CustomHandler>>,
}

/// Guards both the delayed queue and the batch map, per spec.md §4.6 ("a
/// single mutex guards both queue and batches").
#[derive(Default)]
struct State {
    delayed: Vec<Pending>,
    batches: BTreeMap<String, Vec<Pending>>,
}

const TICK_INTERVAL: Duration = Duration::from_secs(10);

/// Runs matched actions according to their `ActionKind`. Cheap to clone:
/// everything it owns is shared behind `Arc`.
#[derive(Clone)]
pub struct ActionScheduler<L: LlmInvoker, C: Clock> {
    llm: L,
    clock: C,
    prompts: Arc<PromptRegistry>,
    state: Arc<Mutex<State>>,
}

impl<L: LlmInvoker, C: Clock> ActionScheduler<L, C> {
    pub fn new(llm: L, clock: C, prompts: Arc<PromptRegistry>) -> Self {
        Self { llm, clock, prompts, state: Arc::new(Mutex::new(State::default())) }
    }

    /// Schedule `action` for `event` per its kind, running it through
    /// `handler` if one is given (a registered override), or the default
    /// template+LLM body otherwise. `Immediate` spawns a detached task and
    /// returns immediately; `Delayed`/`Batched` just enqueue — the
    /// background tick (see [`Self::spawn_tick_loop`]) does the work.
    pub fn schedule(&self, event: StorageEvent, action: Action, handler: Option<Arc<dyn CustomHandler>>) {
        use hal9000_core::ActionKind;

        match action.kind {
            ActionKind::Immediate => {
                let scheduler = self.clone();
                tokio::spawn(async move {
                    scheduler.run(&event, &action, handler.as_deref()).await;
                });
            }
            ActionKind::Delayed => {
                let execute_at = self.clock.now() + chrono::Duration::from_std(action.delay()).unwrap_or_default();
                self.state.lock().delayed.push(Pending { event, action, execute_at: Some(execute_at), handler });
            }
            ActionKind::Batched => {
                let key = action.name.clone();
                self.state.lock().batches.entry(key).or_default().push(Pending { event, action, execute_at: None, handler });
            }
        }
    }

    /// Expand `action`'s prompt template against `event` and invoke the
    /// LLM CLI, returning its captured stdout. This is the default
    /// execution body; a registered [`CustomHandler`] replaces it.
    pub async fn execute(&self, event: &StorageEvent, action: &Action) -> Result<String, DispatchError> {
        let template = self
            .prompts
            .get(&action.prompt_template_name)
            .ok_or_else(|| DispatchError::TemplateNotFound(action.prompt_template_name.clone()))?;

        let event_data = serde_json::to_string_pretty(&event.data).unwrap_or_default();
        let vars = BTreeMap::from([
            ("event_id".to_string(), event.event_id.clone()),
            ("source".to_string(), event.source.clone()),
            ("category".to_string(), event.category.clone()),
            ("fetched_at".to_string(), event.fetched_at.to_rfc3339()),
            ("event_data".to_string(), event_data),
        ]);

        let prompt = expand(template, &vars);
        self.llm.invoke(&prompt).await
    }

    async fn run(&self, event: &StorageEvent, action: &Action, handler: Option<&dyn CustomHandler>) {
        match handler {
            Some(handler) => handler.handle(event, action).await,
            None => {
                if let Err(e) = self.execute(event, action).await {
                    tracing::error!(error = %e, action = %action.name, "action failed");
                }
            }
        }
    }

    /// Drain every delayed entry whose `execute_at` is due, and flush the
    /// batch map, running the resulting handlers. Called by the
    /// background tick; also exposed directly so tests can drive a single
    /// tick deterministically against a `FakeClock`.
    pub async fn tick(&self) {
        let due = {
            let mut state = self.state.lock();
            let now = self.clock.now();
            let mut due = Vec::new();
            state.delayed.retain(|pending| {
                let is_due = pending.execute_at.map(|at| at <= now).unwrap_or(true);
                if is_due {
                    due.push(pending.clone());
                }
                !is_due
            });
            due
        };
        for pending in due {
            self.run(&pending.event, &pending.action, pending.handler.as_deref()).await;
        }

        let batches = std::mem::take(&mut self.state.lock().batches);
        for (name, entries) in batches {
            let Some(head) = entries.first().cloned() else { continue };
            let ids: Vec<&str> = entries.iter().map(|p| p.event.event_id.as_str()).collect();
            let event_id = ids.join(",");
            let mut data = BTreeMap::new();
            data.insert("batch_count".to_string(), serde_json::json!(entries.len()));
            data.insert("event_ids".to_string(), serde_json::json!(ids));
            let synthesized = StorageEvent {
                kind: head.event.kind,
                source: head.event.source.clone(),
                event_id,
                fetched_at: self.clock.now(),
                category: head.event.category.clone(),
                data,
            };
            tracing::debug!(batch = %name, count = entries.len(), "flushing batch");
            self.run(&synthesized, &head.action, head.handler.as_deref()).await;
        }
    }

    /// Spawn the background task driving [`Self::tick`] every 10 seconds.
    /// Returns a handle the caller can abort on shutdown; batched actions
    /// are intentionally not flushed when the loop stops (spec.md §4.6
    /// documents no shutdown-drain guarantee).
    pub fn spawn_tick_loop(&self) -> tokio::task::JoinHandle<()> {
        let scheduler = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(TICK_INTERVAL);
            loop {
                interval.tick().await;
                scheduler.tick().await;
            }
        })
    }

    #[cfg(any(test, feature = "test-support"))]
    pub fn pending_delayed_count(&self) -> usize {
        self.state.lock().delayed.len()
    }

    #[cfg(any(test, feature = "test-support"))]
    pub fn pending_batch_count(&self, name: &str) -> usize {
        self.state.lock().batches.get(name).map(Vec::len).unwrap_or(0)
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;

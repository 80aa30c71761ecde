use super::*;
use crate::llm::fake::FakeLlmInvoker;
use hal9000_core::{Action, ActionKind, FakeClock, StorageEvent, StorageEventKind};
use std::collections::BTreeMap;

fn action(name: &str, kind: ActionKind) -> Action {
    Action {
        name: name.to_string(),
        event_type: "jira".to_string(),
        enabled: true,
        fetchers: vec![],
        prompt_template_name: "tmpl".to_string(),
        kind,
        metadata: BTreeMap::new(),
    }
}

fn event(event_id: &str) -> StorageEvent {
    StorageEvent {
        kind: StorageEventKind::Store,
        source: "jira".to_string(),
        event_id: event_id.to_string(),
        fetched_at: chrono::Utc::now(),
        category: "issue".to_string(),
        data: BTreeMap::new(),
    }
}

fn scheduler_with_template() -> (ActionScheduler<FakeLlmInvoker, FakeClock>, FakeLlmInvoker) {
    let llm = FakeLlmInvoker::new();
    let clock = FakeClock::default();
    let mut prompts = PromptRegistry::new();
    prompts.register("tmpl", "source={{source}} id={{event_id}}");
    (ActionScheduler::new(llm.clone(), clock, Arc::new(prompts)), llm)
}

#[tokio::test]
async fn execute_expands_template_and_invokes_llm() {
    let (scheduler, llm) = scheduler_with_template();
    let out = scheduler.execute(&event("E1"), &action("a", ActionKind::Immediate)).await.unwrap();
    assert_eq!(out, "ok");
    assert_eq!(llm.calls(), vec!["source=jira id=E1".to_string()]);
}

#[tokio::test]
async fn execute_missing_template_is_an_error() {
    let (scheduler, _llm) = scheduler_with_template();
    let mut a = action("a", ActionKind::Immediate);
    a.prompt_template_name = "missing".to_string();
    let err = scheduler.execute(&event("E1"), &a).await.unwrap_err();
    assert!(matches!(err, DispatchError::TemplateNotFound(name) if name == "missing"));
}

#[tokio::test]
async fn delayed_action_is_not_due_until_the_delay_elapses() {
    let (scheduler, llm) = scheduler_with_template();
    scheduler.schedule(event("E1"), action("a", ActionKind::Delayed), None);
    assert_eq!(scheduler.pending_delayed_count(), 1);

    scheduler.tick().await;
    assert_eq!(llm.calls().len(), 0, "default 1 minute delay has not elapsed");
    assert_eq!(scheduler.pending_delayed_count(), 1);
}

#[tokio::test]
async fn delayed_action_runs_once_due() {
    let (scheduler, llm) = scheduler_with_template();
    let mut a = action("a", ActionKind::Delayed);
    a.metadata.insert("delay".to_string(), serde_json::json!("1s"));
    scheduler.schedule(event("E1"), a, None);

    scheduler.tick().await;
    assert_eq!(scheduler.pending_delayed_count(), 1);

    scheduler.clock.advance(chrono::Duration::seconds(2));
    scheduler.tick().await;
    assert_eq!(scheduler.pending_delayed_count(), 0);
    assert_eq!(llm.calls().len(), 1);
}

#[tokio::test]
async fn batched_actions_flush_as_one_handler_call_with_joined_ids() {
    let (scheduler, llm) = scheduler_with_template();
    scheduler.schedule(event("E1"), action("digest", ActionKind::Batched), None);
    scheduler.schedule(event("E2"), action("digest", ActionKind::Batched), None);
    scheduler.schedule(event("E3"), action("digest", ActionKind::Batched), None);
    assert_eq!(scheduler.pending_batch_count("digest"), 3);

    scheduler.tick().await;
    assert_eq!(scheduler.pending_batch_count("digest"), 0);
    assert_eq!(llm.calls().len(), 1, "exactly one handler invocation per flushed batch");
    assert_eq!(llm.calls()[0], "source=jira id=E1,E2,E3");
}

#[tokio::test]
async fn second_tick_with_no_new_batch_entries_does_not_reinvoke() {
    let (scheduler, llm) = scheduler_with_template();
    scheduler.schedule(event("E1"), action("digest", ActionKind::Batched), None);
    scheduler.tick().await;
    scheduler.tick().await;
    assert_eq!(llm.calls().len(), 1);
}

#[tokio::test]
async fn immediate_action_runs_without_being_enqueued() {
    let (scheduler, llm) = scheduler_with_template();
    scheduler.schedule(event("E1"), action("a", ActionKind::Immediate), None);
    // Immediate actions spawn a detached task; give it a chance to run.
    tokio::task::yield_now().await;
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert_eq!(llm.calls().len(), 1);
    assert_eq!(scheduler.pending_delayed_count(), 0);
}

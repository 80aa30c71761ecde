use super::*;

#[tokio::test]
async fn fake_notify_adapter_records_calls() {
    let notifier = FakeNotifyAdapter::new();
    notifier.notify("Task finished", "backup succeeded").await.unwrap();

    let calls = notifier.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].title, "Task finished");
    assert_eq!(calls[0].message, "backup succeeded");
}

#[tokio::test]
async fn fake_notify_adapter_records_calls_in_order() {
    let notifier = FakeNotifyAdapter::new();
    notifier.notify("first", "a").await.unwrap();
    notifier.notify("second", "b").await.unwrap();

    let calls = notifier.calls();
    assert_eq!(calls[0].title, "first");
    assert_eq!(calls[1].title, "second");
}

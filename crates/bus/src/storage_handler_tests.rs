use super::*;
use crate::event_bus::EventBus;
use hal9000_core::StorageEvent;

fn event(kind: StorageEventKind, event_id: &str) -> StorageEvent {
    StorageEvent {
        kind,
        source: "calendar".into(),
        event_id: event_id.into(),
        fetched_at: "2026-01-28T10:00:00Z".parse().unwrap(),
        category: "calendar".into(),
        data: Default::default(),
    }
}

#[test]
fn store_writes_raw_event_file() {
    let dir = tempfile::tempdir().unwrap();
    let handler = StorageHandler::new(Library::new(dir.path()));
    let path = handler.handle(&event(StorageEventKind::Store, "E1")).unwrap().unwrap();
    assert!(path.exists());
    assert_eq!(path.file_name().unwrap(), "calendar_2026-01-28_E1.json");
}

#[test]
fn delete_removes_raw_event_file() {
    let dir = tempfile::tempdir().unwrap();
    let handler = StorageHandler::new(Library::new(dir.path()));
    let path = handler.handle(&event(StorageEventKind::Store, "E1")).unwrap().unwrap();
    handler.handle(&event(StorageEventKind::Delete, "E1")).unwrap();
    assert!(!path.exists());
}

#[test]
fn removed_from_watch_does_not_touch_the_library() {
    let dir = tempfile::tempdir().unwrap();
    let handler = StorageHandler::new(Library::new(dir.path()));
    let path = handler.handle(&event(StorageEventKind::Store, "E1")).unwrap().unwrap();
    let result = handler.handle(&event(StorageEventKind::RemovedFromWatch, "E1")).unwrap();
    assert!(result.is_none());
    assert!(path.exists(), "removed_from_watch must not delete the stored raw event");
}

#[test]
fn bus_wiring_publishes_through_to_filesystem() {
    let dir = tempfile::tempdir().unwrap();
    let handler = StorageHandler::new(Library::new(dir.path()));
    let bus = EventBus::new();
    bus.subscribe(handler.into_handler());

    let result = bus.publish(&event(StorageEventKind::Store, "E1")).unwrap();
    assert!(result.unwrap().exists());
}

use super::*;
use hal9000_core::Stage;
use std::collections::BTreeMap;

fn event(event_id: &str, fetched_at: DateTime<Utc>) -> RawEvent {
    RawEvent { source: "calendar".into(), event_id: event_id.into(), fetched_at, stage: Stage::Raw, data: BTreeMap::new() }
}

#[test]
fn store_writes_canonical_filename() {
    let dir = tempfile::tempdir().unwrap();
    let at = "2026-01-28T10:00:00Z".parse().unwrap();
    let path = store(dir.path(), "calendar", &event("E1", at)).unwrap();
    assert_eq!(path.file_name().unwrap(), "calendar_2026-01-28_E1.json");
}

#[test]
fn store_twice_same_day_overwrites_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let at = "2026-01-28T10:00:00Z".parse().unwrap();
    store(dir.path(), "calendar", &event("E1", at)).unwrap();
    store(dir.path(), "calendar", &event("E1", at)).unwrap();
    let entries: Vec<_> = std::fs::read_dir(category_dir(dir.path(), "calendar")).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn sanitizes_event_id_in_filename() {
    let dir = tempfile::tempdir().unwrap();
    let at = "2026-01-28T10:00:00Z".parse().unwrap();
    let path = store(dir.path(), "calendar", &event("E 1/weird", at)).unwrap();
    assert_eq!(path.file_name().unwrap(), "calendar_2026-01-28_E_1_weird.json");
}

#[test]
fn delete_globs_by_id_across_dates() {
    let dir = tempfile::tempdir().unwrap();
    store(dir.path(), "calendar", &event("E1", "2026-01-28T10:00:00Z".parse().unwrap())).unwrap();
    store(dir.path(), "calendar", &event("E1", "2026-01-29T10:00:00Z".parse().unwrap())).unwrap();
    store(dir.path(), "calendar", &event("E2", "2026-01-28T10:00:00Z".parse().unwrap())).unwrap();

    let removed = delete(dir.path(), "calendar", "E1").unwrap();
    assert_eq!(removed, 2);
    let remaining: Vec<_> = std::fs::read_dir(category_dir(dir.path(), "calendar")).unwrap().collect();
    assert_eq!(remaining.len(), 1);
}

#[test]
fn delete_on_empty_category_is_a_noop() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(delete(dir.path(), "calendar", "E1").unwrap(), 0);
}

use super::*;
use hal9000_core::Edge;
use std::thread::sleep;
use std::time::Duration;

fn content(pairs: &[(&str, &str)]) -> BTreeMap<String, Value> {
    pairs.iter().map(|(k, v)| (k.to_string(), Value::String(v.to_string()))).collect()
}

#[test]
fn store_then_get_round_trips_content_and_links() {
    let dir = tempfile::tempdir().unwrap();
    let lib = Library::new(dir.path());
    let links = vec![Edge { to: "people/bob".into(), kind: "attendee".into(), label: None }];
    lib.store("calendar", "standup", content(&[("summary", "S1")]), links.clone()).unwrap();

    let entity = lib.get("calendar/standup").unwrap();
    assert_eq!(entity.content, content(&[("summary", "S1")]));
    assert_eq!(entity.links, links);
}

#[test]
fn get_missing_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let lib = Library::new(dir.path());
    assert!(matches!(lib.get("calendar/gone"), Err(LibraryError::NotFound(_))));
}

#[test]
fn store_rejects_invalid_id_segments() {
    let dir = tempfile::tempdir().unwrap();
    let lib = Library::new(dir.path());
    let result = lib.store("Calendar", "standup", BTreeMap::new(), vec![]);
    assert!(matches!(result, Err(LibraryError::InvalidId(_))));
}

#[test]
fn delete_removes_entity_and_index() {
    let dir = tempfile::tempdir().unwrap();
    let lib = Library::new(dir.path());
    lib.store("calendar", "standup", BTreeMap::new(), vec![]).unwrap();
    lib.delete("calendar/standup").unwrap();
    assert!(matches!(lib.get("calendar/standup"), Err(LibraryError::NotFound(_))));
}

#[test]
fn delete_missing_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let lib = Library::new(dir.path());
    assert!(matches!(lib.delete("calendar/gone"), Err(LibraryError::NotFound(_))));
}

#[test]
fn store_is_a_destructive_replacement() {
    let dir = tempfile::tempdir().unwrap();
    let lib = Library::new(dir.path());
    lib.store("calendar", "standup", content(&[("summary", "S1")]), vec![]).unwrap();
    lib.store("calendar", "standup", content(&[("summary", "S2")]), vec![]).unwrap();
    let entity = lib.get("calendar/standup").unwrap();
    assert_eq!(entity.content, content(&[("summary", "S2")]));
}

#[test]
fn list_types_excludes_index_dir() {
    let dir = tempfile::tempdir().unwrap();
    let lib = Library::new(dir.path());
    lib.store("calendar", "standup", BTreeMap::new(), vec![]).unwrap();
    lib.store("people", "bob", BTreeMap::new(), vec![]).unwrap();
    assert_eq!(lib.list_types().unwrap(), vec!["calendar".to_string(), "people".to_string()]);
}

#[test]
fn query_filters_by_type_contains_and_since_and_sorts_desc() {
    let dir = tempfile::tempdir().unwrap();
    let lib = Library::new(dir.path());
    lib.store("calendar", "a", content(&[("summary", "alpha")]), vec![]).unwrap();
    sleep(Duration::from_millis(5));
    let since = Utc::now();
    sleep(Duration::from_millis(5));
    lib.store("calendar", "b", content(&[("summary", "beta")]), vec![]).unwrap();
    lib.store("people", "c", content(&[("summary", "alpha")]), vec![]).unwrap();

    let results = lib
        .query(QueryParams { ty: Some("calendar".into()), contains: None, since: Some(since), limit: None })
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "calendar/b");
}

#[test]
fn query_limit_caps_results() {
    let dir = tempfile::tempdir().unwrap();
    let lib = Library::new(dir.path());
    for i in 0..5 {
        lib.store("calendar", &format!("e{i}"), BTreeMap::new(), vec![]).unwrap();
    }
    let results = lib.query(QueryParams { limit: Some(2), ..Default::default() }).unwrap();
    assert_eq!(results.len(), 2);
}

#[test]
fn get_linked_out_follows_edge_index() {
    let dir = tempfile::tempdir().unwrap();
    let lib = Library::new(dir.path());
    lib.store("people", "bob", content(&[("name", "Bob")]), vec![]).unwrap();
    lib.store(
        "calendar",
        "standup",
        BTreeMap::new(),
        vec![Edge { to: "people/bob".into(), kind: "attendee".into(), label: None }],
    )
    .unwrap();

    let linked = lib.get_linked("calendar/standup", Direction::Out).unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].id, "people/bob");
}

#[test]
fn get_linked_out_recomputes_from_entity_when_index_missing() {
    let dir = tempfile::tempdir().unwrap();
    let lib = Library::new(dir.path());
    lib.store("people", "bob", BTreeMap::new(), vec![]).unwrap();
    lib.store(
        "calendar",
        "standup",
        BTreeMap::new(),
        vec![Edge { to: "people/bob".into(), kind: "attendee".into(), label: None }],
    )
    .unwrap();
    // Simulate the crash-between-writes case: index file is missing.
    edges::remove_index(dir.path(), &"calendar/standup".parse().unwrap()).unwrap();

    let linked = lib.get_linked("calendar/standup", Direction::Out).unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].id, "people/bob");
}

#[test]
fn get_linked_in_walks_all_edge_indexes() {
    let dir = tempfile::tempdir().unwrap();
    let lib = Library::new(dir.path());
    lib.store("people", "bob", BTreeMap::new(), vec![]).unwrap();
    lib.store(
        "calendar",
        "standup",
        BTreeMap::new(),
        vec![Edge { to: "people/bob".into(), kind: "attendee".into(), label: None }],
    )
    .unwrap();

    let linked = lib.get_linked("people/bob", Direction::In).unwrap();
    assert_eq!(linked.len(), 1);
    assert_eq!(linked[0].id, "calendar/standup");
}

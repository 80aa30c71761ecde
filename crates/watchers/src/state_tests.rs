use super::*;

#[test]
fn missing_file_loads_as_empty_state() {
    let dir = tempfile::tempdir().unwrap();
    let state = FloydState::load(&dir.path().join("nope.json")).unwrap();
    assert!(state.events.is_empty());
    assert!(state.updated_at.is_none());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jira-state.json");
    let mut state = FloydState { updated_at: Some(Utc::now()), ..Default::default() };
    state.events.insert("ISSUE-1".to_string(), "abc123".to_string());

    state.save(&path).unwrap();
    let loaded = FloydState::load(&path).unwrap();
    assert_eq!(loaded.events.get("ISSUE-1"), Some(&"abc123".to_string()));
}

#[test]
fn save_overwrites_atomically() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");
    let mut state = FloydState::default();
    state.events.insert("A".to_string(), "1".to_string());
    state.save(&path).unwrap();

    state.events.insert("B".to_string(), "2".to_string());
    state.save(&path).unwrap();

    let loaded = FloydState::load(&path).unwrap();
    assert_eq!(loaded.events.len(), 2);
}

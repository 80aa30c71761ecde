use super::*;
use tempfile::tempdir;

#[test]
fn drains_and_deletes_valid_callback_files() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("one.json"), r#"{"source":"jira","payload":{"id":"J-1"}}"#).unwrap();
    std::fs::write(dir.path().join("two.json"), r#"{"source":"calendar"}"#).unwrap();

    let drained = drain_callback_dir(dir.path());

    assert_eq!(drained.len(), 2);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn leaves_unparseable_files_in_place() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("broken.json"), "not json").unwrap();

    let drained = drain_callback_dir(dir.path());

    assert!(drained.is_empty());
    assert!(dir.path().join("broken.json").exists());
}

#[test]
fn ignores_non_json_files() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("readme.txt"), "hello").unwrap();

    let drained = drain_callback_dir(dir.path());

    assert!(drained.is_empty());
    assert!(dir.path().join("readme.txt").exists());
}

#[test]
fn missing_dir_returns_empty_without_panicking() {
    let drained = drain_callback_dir(std::path::Path::new("/nonexistent/hal9000-patrol-test"));
    assert!(drained.is_empty());
}

use super::*;
use tempfile::tempdir;

#[test]
fn tail_returns_the_last_n_lines() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("svc.log");
    std::fs::write(&path, "one\ntwo\nthree\nfour\n").unwrap();
    assert_eq!(tail(&path, 2), vec!["three".to_string(), "four".to_string()]);
}

#[test]
fn tail_on_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    assert!(tail(&dir.path().join("missing.log"), 10).is_empty());
}

#[test]
fn tail_returns_everything_when_fewer_lines_than_n() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("svc.log");
    std::fs::write(&path, "one\ntwo\n").unwrap();
    assert_eq!(tail(&path, 10), vec!["one".to_string(), "two".to_string()]);
}

#[test]
fn scan_for_errors_matches_each_marker_case_insensitively() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("svc.log");
    std::fs::write(&path, "starting up\nERROR: bad config\nFatal: disk full\npanic: unwind\nrequest failed\nall good\n").unwrap();
    let hits = scan_for_errors(&path);
    assert_eq!(hits.len(), 4);
    assert!(hits[0].contains("ERROR"));
}

#[test]
fn scan_for_errors_caps_at_five_most_recent_matches() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("svc.log");
    let body: String = (0..10).map(|i| format!("error {i}\n")).collect();
    std::fs::write(&path, body).unwrap();
    let hits = scan_for_errors(&path);
    assert_eq!(hits.len(), 5);
    assert!(hits[0].contains("error 5"));
    assert!(hits[4].contains("error 9"));
}

#[test]
fn scan_for_errors_on_a_clean_log_is_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("svc.log");
    std::fs::write(&path, "starting up\nready\nlistening\n").unwrap();
    assert!(scan_for_errors(&path).is_empty());
}

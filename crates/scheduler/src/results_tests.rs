use super::*;
use chrono::Utc;
use tempfile::tempdir;

fn result(task: &str, success: bool) -> ExecutionResult {
    ExecutionResult {
        task: task.to_string(),
        timestamp: Utc::now(),
        success,
        duration_ms: 10,
        message: "ok".to_string(),
        output: String::new(),
    }
}

#[test]
fn append_then_tail_round_trips() {
    let dir = tempdir().unwrap();
    append_result(dir.path(), &result("backup", true)).unwrap();
    append_result(dir.path(), &result("backup", false)).unwrap();

    let results = tail_results(dir.path(), "backup", 10).unwrap();
    assert_eq!(results.len(), 2);
    assert!(results[0].success);
    assert!(!results[1].success);
}

#[test]
fn tail_respects_the_limit_keeping_the_most_recent() {
    let dir = tempdir().unwrap();
    for i in 0..5 {
        append_result(dir.path(), &result("backup", i % 2 == 0)).unwrap();
    }
    let results = tail_results(dir.path(), "backup", 2).unwrap();
    assert_eq!(results.len(), 2);
    // Entries 3 and 4 (0-indexed) are the last two appended.
    assert!(!results[0].success);
    assert!(results[1].success);
}

#[test]
fn tail_on_missing_file_is_empty() {
    let dir = tempdir().unwrap();
    let results = tail_results(dir.path(), "never-ran", 10).unwrap();
    assert!(results.is_empty());
}

#[test]
fn results_for_different_tasks_do_not_collide() {
    let dir = tempdir().unwrap();
    append_result(dir.path(), &result("backup", true)).unwrap();
    append_result(dir.path(), &result("report", false)).unwrap();

    assert_eq!(tail_results(dir.path(), "backup", 10).unwrap().len(), 1);
    assert_eq!(tail_results(dir.path(), "report", 10).unwrap().len(), 1);
}

use super::*;
use std::time::{Duration, SystemTime};
use tempfile::tempdir;

#[tokio::test]
async fn library_health_check_is_healthy_for_a_readable_base() {
    let dir = tempdir().unwrap();
    let library = Library::new(dir.path());
    let check = LibraryHealthCheck::new(library);

    assert_eq!(check.check().await, HealthStatus::Healthy);
}

#[tokio::test]
async fn stale_cleaner_removes_only_files_older_than_threshold() {
    let dir = tempdir().unwrap();
    let category_dir = dir.path().join("issue");
    std::fs::create_dir_all(&category_dir).unwrap();

    let stale = category_dir.join("issue_2020-01-01_J-1.json");
    let fresh = category_dir.join("issue_2020-01-01_J-2.json");
    std::fs::write(&stale, "{}").unwrap();
    std::fs::write(&fresh, "{}").unwrap();

    // Backdate the stale file's mtime well past the threshold.
    let old_time = SystemTime::now() - Duration::from_secs(60 * 60 * 24 * 30);
    let file = std::fs::File::open(&stale).unwrap();
    file.set_modified(old_time).unwrap();

    let cleaner = StaleRawEventCleaner::new(dir.path());
    let threshold = Utc::now() - chrono::Duration::days(7);
    let removed = cleaner.clean(threshold).await.unwrap();

    assert_eq!(removed, 1);
    assert!(!stale.exists());
    assert!(fresh.exists());
}

#[tokio::test]
async fn stale_cleaner_tolerates_a_missing_base_dir() {
    let cleaner = StaleRawEventCleaner::new(PathBuf::from("/nonexistent/hal9000-patrol-builtin-test"));
    let removed = cleaner.clean(Utc::now()).await.unwrap();
    assert_eq!(removed, 0);
}

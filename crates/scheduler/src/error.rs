use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("invalid cron expression: {0}")]
    InvalidCron(String),
    #[error("task '{0}' not found")]
    TaskNotFound(String),
    #[error("scheduler is already running (pid file {0} held by a live process)")]
    AlreadyRunning(std::path::PathBuf),
    #[error("scheduler is not running")]
    NotRunning,
    #[error("failed to acquire lock: {0}")]
    LockFailed(std::io::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

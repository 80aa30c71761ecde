use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatrolError {
    #[error("patrol is already running")]
    AlreadyRunning,
    #[error("patrol is not running")]
    NotRunning,
    #[error("callback handler for source '{0}' failed: {1}")]
    CallbackFailed(String, String),
    #[error("cleaner '{0}' failed: {1}")]
    CleanerFailed(String, String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

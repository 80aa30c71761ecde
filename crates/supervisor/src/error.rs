use thiserror::Error;

#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("service '{0}' not found in the manifest")]
    UnknownService(String),
    #[error("service '{0}' is disabled")]
    Disabled(String),
    #[error("service '{0}' is already running (pid {1})")]
    AlreadyRunning(String, i32),
    #[error("service '{0}' is not running")]
    NotRunning(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

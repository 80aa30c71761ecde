use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatcherError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed state or journal record: {0}")]
    Json(#[from] serde_json::Error),
    #[error("missing required credential field: {0}")]
    MissingCredential(String),
    #[error("fetch failed: {0}")]
    FetchFailed(String),
    #[error("partial fetch (some items missing): {0}")]
    PartialFetch(String),
}

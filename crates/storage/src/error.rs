//! Library store error kinds (spec.md §7).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("invalid entity id: {0}")]
    InvalidId(#[from] hal9000_core::InvalidId),
    #[error("entity not found: {0}")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

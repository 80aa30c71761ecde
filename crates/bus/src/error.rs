use thiserror::Error;

#[derive(Debug, Error)]
pub enum BusError {
    #[error("library error: {0}")]
    Library(#[from] hal9000_storage::LibraryError),
    #[error("handler error: {0}")]
    Handler(String),
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("prompt template not found: {0}")]
    TemplateNotFound(String),
    #[error("llm cli invocation failed: {0}")]
    LlmFailed(String),
    #[error("llm cli exited with status {status}: {stderr}")]
    LlmNonZero { status: i32, stderr: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

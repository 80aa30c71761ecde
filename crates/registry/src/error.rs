use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("manifest parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("action not found: {0}")]
    ActionNotFound(String),
    #[error("prompt template not found: {0}")]
    TemplateNotFound(String),
}

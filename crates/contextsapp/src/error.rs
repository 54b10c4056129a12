use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContextsError {
    #[error("Context not found: {0}")]
    ContextNotFound(String),

    #[error("Invalid context: {0}")]
    InvalidContext(String),

    #[error("Filter not found: {0}")]
    FilterNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, ContextsError>;

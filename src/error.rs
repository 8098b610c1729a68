use thiserror::Error;

pub type Result<T> = std::result::Result<T, DexterError>;

#[derive(Debug, Error)]
pub enum DexterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{program} failed: {message}")]
    Command { program: String, message: String },
    #[error("Error: {0}")]
    Generic(String),
}

impl From<String> for DexterError {
    fn from(error: String) -> Self {
        DexterError::Generic(error)
    }
}

impl From<&str> for DexterError {
    fn from(error: &str) -> Self {
        DexterError::Generic(error.to_string())
    }
}

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmotionError {
    #[error("config I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tracker config: {0}")]
    InvalidConfig(String),
}

/// Convenience result type used throughout this crate.
pub type Result<T> = std::result::Result<T, EmotionError>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("failed to decode json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("hand recognizer unavailable: {0}")]
    RecognizerUnavailable(String),
    #[error("malformed recognizer result: {0}")]
    MalformedResult(String),
    #[error("failed to load round image `{slug}`")]
    AssetLoad { slug: String },
    #[error("round pool is empty")]
    EmptyPool,
}

pub type Result<T> = std::result::Result<T, GameError>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("cvv must be an integer, got {0:?}")]
    InvalidCvv(String),
    #[error("last_update is not a valid RFC3339 timestamp: {0}")]
    InvalidTimestamp(#[from] chrono::ParseError),
    #[error("data is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
    #[error(transparent)]
    Database(anyhow::Error),
}

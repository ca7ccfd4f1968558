//! Error handling for tubegrab

use thiserror::Error;

/// Main error type for tubegrab
#[derive(Debug, Error)]
pub enum TubegrabError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    YtDlpNotFound,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Failed to extract video info: {0}")]
    ExtractionFailed(String),

    #[error("Stream failed: {0}")]
    StreamFailure(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Download not found: {0}")]
    ItemNotFound(String),

    #[error("Cannot move download from {from} to {to}")]
    InvalidTransition { from: String, to: String },
}

impl TubegrabError {
    /// Whether the caller sent something unusable, as opposed to a failure on our side
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

pub type Result<T, E = TubegrabError> = std::result::Result<T, E>;

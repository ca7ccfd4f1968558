//! Error responses

use crate::utils::error::TubegrabError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

/// Public message for any failure while fetching metadata
pub const INFO_FAILED: &str = "Failed to fetch video information";

/// Public message for any failure before a download starts streaming
pub const DOWNLOAD_FAILED: &str = "Failed to download video";

/// Public message for any failure while listing formats
pub const FORMATS_FAILED: &str = "Failed to fetch video formats";

/// An error as the client sees it: a status and a single message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    /// Collapse a service error into what the client is allowed to see.
    ///
    /// Input errors keep their message. Everything else is logged in full and reported
    /// as `public_message`.
    pub fn from_service(err: TubegrabError, public_message: &str) -> Self {
        if err.is_client_error() {
            warn!("Rejected request: {}", err);
            Self::bad_request(err.to_string())
        } else {
            error!("{}: {}", public_message, err);
            Self::internal(public_message)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

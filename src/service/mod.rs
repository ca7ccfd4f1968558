//! Request-level operations behind the HTTP handlers

pub mod download;
pub mod info;

pub use download::{prepare_download, DownloadRequest, PreparedDownload};
pub use info::{list_formats, lookup_video_info, FormatSummary, VideoInfo};

use crate::extractor::Extractor;
use crate::utils::error::{Result, TubegrabError};
use serde::{Deserialize, Serialize};

/// Body of `POST /video-info` and `POST /formats`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UrlRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Reject missing and non-video URLs before the extractor is involved
pub fn require_valid_url<'a>(extractor: &dyn Extractor, url: Option<&'a str>) -> Result<&'a str> {
    let url = url
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| TubegrabError::InvalidInput("URL is required".to_string()))?;

    if !extractor.validate(url) {
        return Err(TubegrabError::InvalidInput("Invalid YouTube URL".to_string()));
    }

    Ok(url)
}

//! Metadata lookup

use crate::extractor::{Extractor, Format, Manifest};
use crate::service::require_valid_url;
use crate::utils::display::{format_duration, format_upload_date, format_views, truncate_description};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Video details returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub id: String,
    pub title: String,
    pub thumbnail: String,
    pub duration: String,
    pub author: String,
    pub views: String,
    pub upload_date: String,
    pub description: String,
    pub url: String,
}

impl VideoInfo {
    /// Render a manifest for display; `url` is echoed back as the client sent it
    pub fn from_manifest(manifest: &Manifest, url: &str) -> Self {
        Self {
            id: manifest.id.clone(),
            title: manifest.title.clone(),
            thumbnail: manifest.best_thumbnail().unwrap_or_default().to_string(),
            duration: format_duration(manifest.duration.unwrap_or(0)),
            author: manifest.author().to_string(),
            views: format_views(manifest.view_count.unwrap_or(0)),
            upload_date: format_upload_date(manifest.upload_date.as_deref()),
            description: truncate_description(manifest.description.as_deref()),
            url: url.to_string(),
        }
    }
}

/// One selectable stream, as listed by `POST /formats`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatSummary {
    pub format_id: String,
    pub ext: Option<String>,
    pub resolution: Option<String>,
    pub filesize: Option<u64>,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
}

impl From<&Format> for FormatSummary {
    fn from(format: &Format) -> Self {
        Self {
            format_id: format.format_id.clone(),
            ext: format.ext.clone(),
            resolution: format.resolution(),
            filesize: format.filesize,
            vcodec: format.vcodec.clone(),
            acodec: format.acodec.clone(),
        }
    }
}

/// Validate the URL and fetch display metadata for it
pub async fn lookup_video_info(extractor: &dyn Extractor, url: Option<&str>) -> Result<VideoInfo> {
    let url = require_valid_url(extractor, url)?;
    let manifest = extractor.get_info(url).await?;
    info!("Fetched info for {} ({})", manifest.id, manifest.title);
    Ok(VideoInfo::from_manifest(&manifest, url))
}

/// Validate the URL and list the formats that carry audio or video
pub async fn list_formats(extractor: &dyn Extractor, url: Option<&str>) -> Result<Vec<FormatSummary>> {
    let url = require_valid_url(extractor, url)?;
    let manifest = extractor.get_info(url).await?;
    Ok(manifest
        .formats
        .iter()
        .filter(|f| f.is_media())
        .map(FormatSummary::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::Thumbnail;

    #[test]
    fn test_from_manifest() {
        let manifest = Manifest {
            id: "dQw4w9WgXcQ".to_string(),
            title: "Title".to_string(),
            thumbnails: vec![
                Thumbnail { url: "s".to_string(), width: Some(120), height: Some(90) },
                Thumbnail { url: "l".to_string(), width: Some(1920), height: Some(1080) },
            ],
            duration: Some(3661),
            uploader: Some("Uploader".to_string()),
            view_count: Some(1_234_567),
            upload_date: Some("20091025".to_string()),
            description: None,
            ..Default::default()
        };

        let info = VideoInfo::from_manifest(&manifest, "https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(info.thumbnail, "l");
        assert_eq!(info.duration, "1:01:01");
        assert_eq!(info.author, "Uploader");
        assert_eq!(info.views, "1,234,567");
        assert_eq!(info.upload_date, "2009-10-25");
        assert_eq!(info.description, "No description");
        assert_eq!(info.url, "https://youtu.be/dQw4w9WgXcQ");
    }

    #[test]
    fn test_missing_fields_render_placeholders() {
        let info = VideoInfo::from_manifest(&Manifest::default(), "u");
        assert_eq!(info.thumbnail, "");
        assert_eq!(info.duration, "0:00");
        assert_eq!(info.views, "0");
        assert_eq!(info.author, "Unknown");
    }

    #[test]
    fn test_serializes_camel_case() {
        let info = VideoInfo::from_manifest(&Manifest::default(), "u");
        let json = serde_json::to_value(&info).unwrap();
        assert!(json.get("uploadDate").is_some());
        assert!(json.get("upload_date").is_none());
    }
}

//! Data structures for extractor output

use serde::{Deserialize, Serialize};

/// Parsed video metadata as reported by the extractor
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
    /// Single best thumbnail, when the extractor reports one
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub duration: Option<u64>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub formats: Vec<Format>,
}

/// One thumbnail rendition
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

impl Thumbnail {
    fn area(&self) -> Option<u64> {
        Some(self.width? as u64 * self.height? as u64)
    }
}

/// Stream format information
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Format {
    pub format_id: String,
    #[serde(default)]
    pub ext: Option<String>,
    #[serde(default)]
    pub format_note: Option<String>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub filesize: Option<u64>,
    #[serde(default)]
    pub vcodec: Option<String>,
    #[serde(default)]
    pub acodec: Option<String>,
}

impl Format {
    fn has_codec(codec: &Option<String>) -> bool {
        codec.as_deref().map(|c| c != "none").unwrap_or(true)
    }

    /// Whether this format carries audio or video at all
    pub fn is_media(&self) -> bool {
        Self::has_codec(&self.vcodec) || Self::has_codec(&self.acodec)
    }

    /// Display resolution: the format note, else the pixel height
    pub fn resolution(&self) -> Option<String> {
        self.format_note
            .clone()
            .or_else(|| self.height.map(|h| format!("{}p", h)))
    }
}

impl Manifest {
    /// URL of the highest-resolution thumbnail.
    ///
    /// Entries are compared by pixel area with later entries winning ties; when no entry
    /// reports dimensions the last one is used, since extractors list them smallest first.
    pub fn best_thumbnail(&self) -> Option<&str> {
        let by_area = self
            .thumbnails
            .iter()
            .filter_map(|t| t.area().map(|area| (area, t)))
            .fold(None, |best: Option<(u64, &Thumbnail)>, (area, t)| match best {
                Some((best_area, _)) if best_area > area => best,
                _ => Some((area, t)),
            })
            .map(|(_, t)| t);

        by_area
            .or_else(|| self.thumbnails.last())
            .map(|t| t.url.as_str())
            .or(self.thumbnail.as_deref())
    }

    /// Author shown to users
    pub fn author(&self) -> &str {
        self.uploader
            .as_deref()
            .or(self.channel.as_deref())
            .unwrap_or("Unknown")
    }
}

/// yt-dlp sometimes reports fractional durations; keep whole seconds.
fn lenient_seconds<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<f64> = Option::deserialize(deserializer)?;
    Ok(value.filter(|v| v.is_finite() && *v >= 0.0).map(|v| v as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thumb(url: &str, size: Option<(u32, u32)>) -> Thumbnail {
        Thumbnail {
            url: url.to_string(),
            width: size.map(|s| s.0),
            height: size.map(|s| s.1),
        }
    }

    #[test]
    fn test_best_thumbnail_by_area() {
        let manifest = Manifest {
            thumbnails: vec![
                thumb("small", Some((120, 90))),
                thumb("large", Some((1280, 720))),
                thumb("medium", Some((480, 360))),
            ],
            ..Default::default()
        };
        assert_eq!(manifest.best_thumbnail(), Some("large"));
    }

    #[test]
    fn test_best_thumbnail_without_dimensions_uses_last() {
        let manifest = Manifest {
            thumbnails: vec![thumb("a", None), thumb("b", None), thumb("c", None)],
            ..Default::default()
        };
        assert_eq!(manifest.best_thumbnail(), Some("c"));
    }

    #[test]
    fn test_best_thumbnail_falls_back_to_single_field() {
        let manifest = Manifest {
            thumbnail: Some("single".to_string()),
            ..Default::default()
        };
        assert_eq!(manifest.best_thumbnail(), Some("single"));
        assert_eq!(Manifest::default().best_thumbnail(), None);
    }

    #[test]
    fn test_parse_ytdlp_json() {
        let json = r#"{
            "id": "dQw4w9WgXcQ",
            "title": "Test",
            "duration": 212.0,
            "uploader": "Someone",
            "view_count": 42,
            "upload_date": "20091025",
            "thumbnails": [{"url": "https://i.ytimg.com/a.jpg", "width": 120, "height": 90}],
            "formats": [
                {"format_id": "18", "ext": "mp4", "height": 360, "vcodec": "avc1", "acodec": "mp4a"},
                {"format_id": "sb0", "ext": "mhtml", "vcodec": "none", "acodec": "none"}
            ],
            "extra_field": true
        }"#;

        let manifest: Manifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.duration, Some(212));
        assert_eq!(manifest.author(), "Someone");
        assert_eq!(manifest.formats.len(), 2);
        assert!(manifest.formats[0].is_media());
        assert!(!manifest.formats[1].is_media());
        assert_eq!(manifest.formats[0].resolution().as_deref(), Some("360p"));
    }

    #[test]
    fn test_author_fallbacks() {
        let mut manifest = Manifest {
            channel: Some("Channel".to_string()),
            ..Default::default()
        };
        assert_eq!(manifest.author(), "Channel");
        manifest.channel = None;
        assert_eq!(manifest.author(), "Unknown");
    }
}

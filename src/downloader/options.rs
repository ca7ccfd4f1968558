//! Translation of user download choices into extractor options

use crate::extractor::StreamOptions;
use crate::utils::display::sanitize_title;

/// Format token that selects the audio-only path
pub const AUDIO_FORMAT: &str = "mp3";

/// Selector used for unrecognized quality labels
pub const BEST_VIDEO: &str = "best";

/// Selector for the highest-quality audio stream
pub const BEST_AUDIO: &str = "bestaudio";

const DEFAULT_FORMAT: &str = "mp4";
const FALLBACK_TITLE: &str = "video";

/// Media kind a request resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

impl MediaKind {
    pub fn from_format(format: &str) -> Self {
        if format == AUDIO_FORMAT {
            MediaKind::Audio
        } else {
            MediaKind::Video
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            MediaKind::Audio => "audio/mpeg",
            MediaKind::Video => "video/mp4",
        }
    }
}

/// Map a quality label to a yt-dlp format selector.
///
/// 1080p has no progressive stream, so it pairs the 1080p video itag with the AAC audio one.
pub fn quality_selector(label: Option<&str>) -> &'static str {
    match label {
        Some("360p") => "18",
        Some("720p") => "22",
        Some("1080p") => "137+140",
        _ => BEST_VIDEO,
    }
}

/// Everything needed to answer a download request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadPlan {
    pub kind: MediaKind,
    pub options: StreamOptions,
    pub filename: String,
}

impl DownloadPlan {
    /// Build the plan for a video title and the user's format/quality choice
    pub fn new(title: &str, format: Option<&str>, quality: Option<&str>) -> Self {
        let format = format.map(str::trim).filter(|f| !f.is_empty()).unwrap_or(DEFAULT_FORMAT);
        let kind = MediaKind::from_format(format);

        let (options, extension) = match kind {
            MediaKind::Audio => (
                StreamOptions {
                    selector: BEST_AUDIO.to_string(),
                    audio_only: true,
                },
                AUDIO_FORMAT.to_string(),
            ),
            MediaKind::Video => (
                StreamOptions {
                    selector: quality_selector(quality).to_string(),
                    audio_only: false,
                },
                file_extension(format),
            ),
        };

        // Tabs and line breaks are legal in titles but not in a header value
        let mut stem: String = sanitize_title(title)
            .chars()
            .map(|c| if c.is_whitespace() { ' ' } else { c })
            .collect();
        if stem.is_empty() {
            stem = FALLBACK_TITLE.to_string();
        }

        Self {
            kind,
            options,
            filename: format!("{}.{}", stem, extension),
        }
    }

    pub fn content_type(&self) -> &'static str {
        self.kind.content_type()
    }

    /// Value for the `Content-Disposition` header
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename=\"{}\"", self.filename)
    }
}

/// The requested format becomes the extension, minus anything that could break a header
fn file_extension(format: &str) -> String {
    let ext: String = format.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
    if ext.is_empty() {
        DEFAULT_FORMAT.to_string()
    } else {
        ext
    }
}

use crate::extractor::models::Manifest;
use crate::utils::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

/// Media bytes as they arrive from the extractor
pub type MediaStream = BoxStream<'static, std::io::Result<Bytes>>;

/// What the extractor should select when opening a stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamOptions {
    /// Format selector handed to the extractor (`18`, `137+140`, `bestaudio`, ...)
    pub selector: String,
    /// Only audio is wanted
    pub audio_only: bool,
}

/// Core trait for video extractors
///
/// This isolates the service from the extraction backend. Everything about manifests,
/// signatures and stream negotiation lives behind it.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Returns a unique identifier for this extractor (e.g. "ytdlp")
    fn id(&self) -> &'static str;

    /// Checks whether the URL has the accepted video-URL shape
    fn validate(&self, url: &str) -> bool;

    /// Fetches the manifest for a video
    async fn get_info(&self, url: &str) -> Result<Manifest>;

    /// Opens a byte stream of the selected media.
    ///
    /// Dropping the stream must release every upstream resource.
    async fn open_stream(&self, url: &str, options: &StreamOptions) -> Result<MediaStream>;
}

//! tubegrab library

pub mod downloader;
pub mod extractor;
pub mod queue;
pub mod server;
pub mod service;
pub mod utils;

// Re-export main types for easier use
pub use extractor::{Extractor, Manifest, StreamOptions, YtDlpExtractor};
pub use queue::{DownloadItem, DownloadQueue, DownloadStatus};
pub use server::{router, AppState};
pub use service::{DownloadRequest, VideoInfo};
pub use utils::{ServerSettings, TubegrabError};

pub mod models;
pub mod traits;
pub mod validate;
pub mod ytdlp;

pub use models::{Format, Manifest, Thumbnail};
pub use traits::{Extractor, MediaStream, StreamOptions};
pub use validate::is_valid_video_url;
pub use ytdlp::YtDlpExtractor;

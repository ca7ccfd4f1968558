pub mod item;
pub mod manager;
pub mod progress;

pub use item::{DownloadItem, DownloadStatus};
pub use manager::DownloadQueue;
pub use progress::ProgressSample;

//! Download option mapping and stream forwarding

pub mod options;
pub mod stream;

pub use options::{quality_selector, DownloadPlan, MediaKind};
pub use stream::{instrument, prime};

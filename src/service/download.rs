//! Download preparation

use crate::downloader::{self, DownloadPlan};
use crate::extractor::{Extractor, MediaStream};
use crate::service::require_valid_url;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Body of `POST /download`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DownloadRequest {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub quality: Option<String>,
}

/// A download whose stream has already produced its first bytes
pub struct PreparedDownload {
    pub plan: DownloadPlan,
    pub stream: MediaStream,
}

impl std::fmt::Debug for PreparedDownload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreparedDownload")
            .field("plan", &self.plan)
            .finish_non_exhaustive()
    }
}

/// Validate the request, name the file, and open the upstream stream.
///
/// Every error returned here happens before any byte reaches the client.
pub async fn prepare_download(
    extractor: &dyn Extractor,
    request: &DownloadRequest,
) -> Result<PreparedDownload> {
    let url = require_valid_url(extractor, request.url.as_deref())?;

    let manifest = extractor.get_info(url).await?;
    let plan = DownloadPlan::new(
        &manifest.title,
        request.format.as_deref(),
        request.quality.as_deref(),
    );
    info!(
        "Downloading {} as {} (selector {})",
        manifest.id, plan.filename, plan.options.selector
    );

    let stream = extractor.open_stream(url, &plan.options).await?;
    let stream = downloader::prime(stream).await?;
    let stream = downloader::instrument(stream, plan.filename.clone());

    Ok(PreparedDownload { plan, stream })
}

//! HTTP handlers

use crate::server::error::{ApiError, DOWNLOAD_FAILED, FORMATS_FAILED, INFO_FAILED};
use crate::server::extract::JsonBody;
use crate::server::AppState;
use crate::service::{self, DownloadRequest, FormatSummary, UrlRequest, VideoInfo};
use axum::body::Body;
use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::HeaderValue;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

pub async fn index() -> &'static str {
    "YouTube Downloader API"
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn video_info(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<UrlRequest>,
) -> Result<Json<VideoInfo>, ApiError> {
    service::lookup_video_info(state.extractor.as_ref(), request.url.as_deref())
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, INFO_FAILED))
}

pub async fn formats(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<UrlRequest>,
) -> Result<Json<Vec<FormatSummary>>, ApiError> {
    service::list_formats(state.extractor.as_ref(), request.url.as_deref())
        .await
        .map(Json)
        .map_err(|e| ApiError::from_service(e, FORMATS_FAILED))
}

/// Stream the requested media as an attachment.
///
/// Headers are only committed once the upstream has produced data. A failure after that
/// point surfaces as a body error, which aborts the connection mid-transfer.
pub async fn download(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<DownloadRequest>,
) -> Result<Response, ApiError> {
    let prepared = service::prepare_download(state.extractor.as_ref(), &request)
        .await
        .map_err(|e| ApiError::from_service(e, DOWNLOAD_FAILED))?;

    let disposition = HeaderValue::from_str(&prepared.plan.content_disposition()).map_err(|e| {
        error!("Unusable filename {:?}: {}", prepared.plan.filename, e);
        ApiError::internal(DOWNLOAD_FAILED)
    })?;
    let content_type = HeaderValue::from_static(prepared.plan.content_type());

    let mut response = Body::from_stream(prepared.stream).into_response();
    let headers = response.headers_mut();
    headers.insert(CONTENT_DISPOSITION, disposition);
    headers.insert(CONTENT_TYPE, content_type);

    Ok(response)
}

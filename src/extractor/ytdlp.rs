//! yt-dlp wrapper for video extraction
//!
//! Metadata comes from `yt-dlp --dump-json`; media is streamed from yt-dlp's stdout
//! (`-o -`) so nothing touches the disk.

use crate::extractor::models::Manifest;
use crate::extractor::traits::{Extractor, MediaStream, StreamOptions};
use crate::extractor::validate::is_valid_video_url;
use crate::utils::error::{Result, TubegrabError};
use async_trait::async_trait;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncBufReadExt;
use tokio::process::{Child, Command as AsyncCommand};
use tokio_util::io::ReaderStream;
use tracing::{debug, error, info, warn};

/// Video extractor backed by the yt-dlp executable
#[derive(Debug, Clone)]
pub struct YtDlpExtractor {
    ytdlp_path: PathBuf,
}

impl YtDlpExtractor {
    /// Initialize extractor and verify yt-dlp availability
    ///
    /// An explicit path wins; otherwise see [`find_ytdlp`] for the search order.
    pub fn new(explicit: Option<PathBuf>) -> Result<Self> {
        let ytdlp_path = match explicit {
            Some(path) if path.exists() => path,
            Some(path) => {
                error!("Configured yt-dlp does not exist: {}", path.display());
                return Err(TubegrabError::YtDlpNotFound);
            }
            None => find_ytdlp().ok_or_else(|| {
                error!("yt-dlp not found anywhere!");
                TubegrabError::YtDlpNotFound
            })?,
        };

        info!("Using yt-dlp at: {}", ytdlp_path.display());
        Ok(Self { ytdlp_path })
    }

    /// Get the path to yt-dlp being used
    pub fn ytdlp_path(&self) -> &Path {
        &self.ytdlp_path
    }

    fn command(&self) -> AsyncCommand {
        let mut cmd = AsyncCommand::new(&self.ytdlp_path);
        cmd.arg("--no-warnings").arg("--no-playlist");
        cmd
    }
}

/// Arguments for streaming the selected media to stdout
pub fn stream_args(url: &str, options: &StreamOptions) -> Vec<String> {
    let mut args = vec![
        "-f".to_string(),
        options.selector.clone(),
        "-o".to_string(),
        "-".to_string(),
        "--quiet".to_string(),
        "--no-part".to_string(),
    ];
    if !options.audio_only {
        // Merged selections (137+140) need a container that can go to a pipe
        args.push("--merge-output-format".to_string());
        args.push("mp4".to_string());
    }
    args.push(url.to_string());
    args
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    fn id(&self) -> &'static str {
        "ytdlp"
    }

    fn validate(&self, url: &str) -> bool {
        is_valid_video_url(url)
    }

    /// Uses: yt-dlp --dump-json --no-download
    async fn get_info(&self, url: &str) -> Result<Manifest> {
        debug!("Extracting video info for URL: {}", url);

        let output = self
            .command()
            .arg("--dump-json")
            .arg("--no-download")
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            error!("yt-dlp extraction failed: {}", error_msg.trim());
            return Err(TubegrabError::ExtractionFailed(error_msg.trim().to_string()));
        }

        let manifest: Manifest = serde_json::from_slice(&output.stdout)?;
        Ok(manifest)
    }

    async fn open_stream(&self, url: &str, options: &StreamOptions) -> Result<MediaStream> {
        debug!("Opening stream for {} with selector {}", url, options.selector);

        let mut child = self
            .command()
            .args(stream_args(url, options))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(async move {
                let mut lines = tokio::io::BufReader::new(stderr).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    if line.contains("ERROR") {
                        warn!("yt-dlp: {}", line);
                    } else {
                        debug!("yt-dlp: {}", line);
                    }
                }
            });
        }

        let stdout = child.stdout.take().ok_or_else(|| {
            TubegrabError::StreamFailure("yt-dlp stdout was not captured".to_string())
        })?;

        Ok(ReaderStream::new(stdout).chain(exit_status(child)).boxed())
    }
}

/// Yields a single error item if the process exits unsuccessfully, nothing otherwise.
///
/// The child lives inside this stream, so dropping the stream kills the process.
fn exit_status(mut child: Child) -> impl futures::Stream<Item = std::io::Result<bytes::Bytes>> {
    futures::stream::once(async move {
        match child.wait().await {
            Ok(status) if status.success() => None,
            Ok(status) => Some(Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("yt-dlp exited with {}", status),
            ))),
            Err(e) => Some(Err(e)),
        }
    })
    .filter_map(futures::future::ready)
}

// ============================================================
// yt-dlp Detection Functions
// ============================================================

/// Find yt-dlp binary with priority:
/// 1. Next to the current executable
/// 2. System PATH
/// 3. Common installation paths
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Some(bundled) = find_next_to_exe() {
        info!("✓ Using bundled yt-dlp: {:?}", bundled);
        return Some(bundled);
    }

    if let Ok(system) = which::which("yt-dlp") {
        info!("✓ Using system yt-dlp: {:?}", system);
        return Some(system);
    }

    if let Some(common) = find_in_common_paths() {
        info!("✓ Using yt-dlp from common path: {:?}", common);
        return Some(common);
    }

    warn!("✗ yt-dlp not found anywhere!");
    None
}

fn find_next_to_exe() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    let candidate = exe_path.parent()?.join("yt-dlp");
    (candidate.is_file() && is_executable(&candidate)).then_some(candidate)
}

fn find_in_common_paths() -> Option<PathBuf> {
    let mut candidates = vec![
        PathBuf::from("/opt/homebrew/bin/yt-dlp"),
        PathBuf::from("/usr/local/bin/yt-dlp"),
        PathBuf::from("/usr/bin/yt-dlp"),
    ];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(".local").join("bin").join("yt-dlp"));
    }

    candidates
        .into_iter()
        .find(|path| path.is_file() && is_executable(path))
}

/// Check if a file is executable
fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        std::fs::metadata(path)
            .map(|m| m.permissions().mode() & 0o111 != 0)
            .unwrap_or(false)
    }

    #[cfg(not(unix))]
    {
        path.exists()
    }
}

//! tubegrab - YouTube download backend
//!
//! Serves video metadata and streams downloads, delegating extraction to yt-dlp.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tubegrab::server::{self, AppState};
use tubegrab::utils::cleanup::spawn_sweeper;
use tubegrab::utils::config::{parse_origins, ServerSettings};
use tubegrab::{Extractor, TubegrabError, YtDlpExtractor};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON settings file; flags and environment override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Interface to bind
    #[arg(long, env = "HOST")]
    host: Option<String>,

    /// Listening port
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Scratch directory created at startup
    #[arg(long, env = "DOWNLOAD_FOLDER")]
    downloads_dir: Option<PathBuf>,

    /// Sweep downloads directory entries older than this many hours
    #[arg(long, env = "CLEANUP_AFTER_HOURS")]
    cleanup_after_hours: Option<u64>,

    /// Comma separated CORS origins, `*` for any
    #[arg(long, env = "CORS_ORIGINS")]
    cors_origins: Option<String>,

    /// Path to the yt-dlp executable
    #[arg(long, env = "YTDLP_PATH")]
    ytdlp_path: Option<PathBuf>,
}

impl Args {
    fn into_settings(self) -> Result<ServerSettings> {
        let mut settings = match &self.config {
            Some(path) => ServerSettings::from_file(path)
                .with_context(|| format!("Failed to load settings from {}", path.display()))?,
            None => ServerSettings::default(),
        };

        if let Some(host) = self.host {
            settings.host = host;
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(dir) = self.downloads_dir {
            settings.downloads_dir = dir;
        }
        if let Some(hours) = self.cleanup_after_hours {
            settings.cleanup_after_hours = hours;
        }
        if let Some(origins) = self.cors_origins {
            settings.cors_origins = parse_origins(&origins);
        }
        if self.ytdlp_path.is_some() {
            settings.ytdlp_path = self.ytdlp_path;
        }

        Ok(settings)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tubegrab=info,tower_http=info")),
        )
        .init();

    let settings = Args::parse().into_settings()?;

    let downloads_dir = settings.absolute_downloads_dir();
    tokio::fs::create_dir_all(&downloads_dir)
        .await
        .with_context(|| format!("Failed to create {}", downloads_dir.display()))?;
    info!("Download folder: {}", downloads_dir.display());

    let extractor = match YtDlpExtractor::new(settings.ytdlp_path.clone()) {
        Ok(extractor) => extractor,
        Err(e @ TubegrabError::YtDlpNotFound) => {
            error!("Please install yt-dlp:");
            error!("  pip install yt-dlp");
            error!("  or: brew install yt-dlp");
            error!("  or visit: https://github.com/yt-dlp/yt-dlp");
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    info!(
        extractor = extractor.id(),
        path = %extractor.ytdlp_path().display(),
        "Extractor ready"
    );

    let max_age = Duration::from_secs(settings.cleanup_after_hours.saturating_mul(3600));
    spawn_sweeper(downloads_dir, max_age);

    let state = AppState::new(Arc::new(extractor));
    server::serve(&settings, state).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = Args::try_parse_from([
            "tubegrab",
            "--port",
            "8080",
            "--cors-origins",
            "http://localhost:5173,http://127.0.0.1:5173",
        ])
        .unwrap();

        let settings = args.into_settings().unwrap();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.cors_origins.len(), 2);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let args = Args::try_parse_from(["tubegrab", "--config", "/no/such/settings.json"]).unwrap();
        assert!(args.into_settings().is_err());
    }
}

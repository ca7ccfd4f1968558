//! Server configuration

use crate::utils::error::Result;
use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind
    pub host: String,

    /// Listening port
    pub port: u16,

    /// Scratch directory created at startup
    pub downloads_dir: PathBuf,

    /// Entries in `downloads_dir` older than this are swept
    pub cleanup_after_hours: u64,

    /// Allowed CORS origins; `*` allows any
    pub cors_origins: Vec<String>,

    /// Explicit yt-dlp binary, skipping auto-detection
    pub ytdlp_path: Option<PathBuf>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            downloads_dir: PathBuf::from("downloads"),
            cleanup_after_hours: 24,
            cors_origins: vec!["*".to_string()],
            ytdlp_path: None,
        }
    }
}

impl ServerSettings {
    /// Load settings from a JSON file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Downloads directory resolved against the working directory
    pub fn absolute_downloads_dir(&self) -> PathBuf {
        self.downloads_dir
            .absolutize()
            .map(|p| p.into_owned())
            .unwrap_or_else(|_| self.downloads_dir.clone())
    }

    /// True when every origin is allowed
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o.trim() == "*")
    }
}

/// Split a comma separated origin list, dropping empty entries
pub fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = ServerSettings::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert!(config.allows_any_origin());
        assert!(config.cleanup_after_hours > 0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"port": 8080, "cors_origins": ["http://localhost:5173"]}}"#).unwrap();

        let config = ServerSettings::from_file(file.path()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert!(!config.allows_any_origin());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(ServerSettings::from_file(file.path()).is_err());
    }

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins("http://a.test, http://b.test,,"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_absolute_downloads_dir() {
        let config = ServerSettings::default();
        assert!(config.absolute_downloads_dir().is_absolute());
    }
}

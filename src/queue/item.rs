//! A single download attempt as tracked by a client

use crate::queue::progress::{
    format_eta, format_speed, ProgressSample, ETA_COMPLETE, ETA_ERROR, ETA_UNKNOWN, IDLE_SPEED,
};
use crate::service::VideoInfo;
use crate::utils::error::{Result, TubegrabError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Download status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    #[default]
    Pending,
    Downloading,
    Paused,
    Completed,
    Error,
}

impl DownloadStatus {
    /// Terminal states accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, DownloadStatus::Completed | DownloadStatus::Error)
    }

    /// Whether the state machine allows moving from `self` to `next`
    pub fn can_transition_to(&self, next: DownloadStatus) -> bool {
        use DownloadStatus::*;
        if self.is_terminal() {
            return false;
        }
        matches!(
            (self, next),
            (Pending, Downloading)
                | (Pending, Error)
                | (Downloading, Paused)
                | (Downloading, Completed)
                | (Downloading, Error)
                | (Paused, Downloading)
                | (Paused, Error)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadStatus::Pending => "pending",
            DownloadStatus::Downloading => "downloading",
            DownloadStatus::Paused => "paused",
            DownloadStatus::Completed => "completed",
            DownloadStatus::Error => "error",
        }
    }
}

impl fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Download item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadItem {
    pub id: String,
    pub video: VideoInfo,
    pub format: String,
    pub quality: String,
    pub status: DownloadStatus,
    /// 0-100
    pub progress: f64,
    pub download_speed: String,
    pub estimated_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl DownloadItem {
    /// Create a new pending item
    pub fn new(video: VideoInfo, format: impl Into<String>, quality: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            video,
            format: format.into(),
            quality: quality.into(),
            status: DownloadStatus::Pending,
            progress: 0.0,
            download_speed: IDLE_SPEED.to_string(),
            estimated_time: ETA_UNKNOWN.to_string(),
            error: None,
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    fn transition(&mut self, next: DownloadStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(TubegrabError::InvalidTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }

    pub fn start(&mut self) -> Result<()> {
        self.transition(DownloadStatus::Downloading)
    }

    pub fn pause(&mut self) -> Result<()> {
        self.transition(DownloadStatus::Paused)?;
        self.download_speed = IDLE_SPEED.to_string();
        Ok(())
    }

    pub fn resume(&mut self) -> Result<()> {
        if self.status != DownloadStatus::Paused {
            return Err(TubegrabError::InvalidTransition {
                from: self.status.to_string(),
                to: DownloadStatus::Downloading.to_string(),
            });
        }
        self.transition(DownloadStatus::Downloading)
    }

    /// Apply a progress report; ignored unless the item is downloading.
    ///
    /// Returns whether the report was applied.
    pub fn update_progress(&mut self, sample: ProgressSample) -> bool {
        if self.status != DownloadStatus::Downloading {
            return false;
        }
        self.progress = sample.percentage();
        self.download_speed = format_speed(sample.speed);
        self.estimated_time = format_eta(sample.eta());
        true
    }

    pub fn complete(&mut self) -> Result<()> {
        self.transition(DownloadStatus::Completed)?;
        self.progress = 100.0;
        self.download_speed = IDLE_SPEED.to_string();
        self.estimated_time = ETA_COMPLETE.to_string();
        self.completed_at = Some(Utc::now());
        Ok(())
    }

    pub fn fail(&mut self, error: impl Into<String>) -> Result<()> {
        self.transition(DownloadStatus::Error)?;
        self.error = Some(error.into());
        self.download_speed = IDLE_SPEED.to_string();
        self.estimated_time = ETA_ERROR.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::Manifest;

    fn sample_item() -> DownloadItem {
        let video = VideoInfo::from_manifest(&Manifest::default(), "https://youtu.be/dQw4w9WgXcQ");
        DownloadItem::new(video, "mp4", "720p")
    }

    #[test]
    fn test_new_item_is_pending() {
        let item = sample_item();
        assert_eq!(item.status, DownloadStatus::Pending);
        assert_eq!(item.progress, 0.0);
        assert_eq!(item.download_speed, IDLE_SPEED);
        assert_eq!(item.estimated_time, ETA_UNKNOWN);
        assert!(item.completed_at.is_none());
    }

    #[test]
    fn test_full_lifecycle() {
        let mut item = sample_item();
        item.start().unwrap();
        assert!(item.update_progress(ProgressSample::new(2500, 10_000, 1024.0 * 1024.0)));
        assert_eq!(item.progress, 25.0);
        assert_eq!(item.download_speed, "1.0 MB/s");
        assert_eq!(item.estimated_time, "0s");

        item.complete().unwrap();
        assert_eq!(item.status, DownloadStatus::Completed);
        assert_eq!(item.progress, 100.0);
        assert_eq!(item.estimated_time, ETA_COMPLETE);
        assert!(item.completed_at.is_some());
    }

    #[test]
    fn test_pause_resume_lifecycle() {
        let mut item = sample_item();
        item.start().unwrap();
        item.update_progress(ProgressSample::new(500, 1000, 100.0));

        item.pause().unwrap();
        assert_eq!(item.status, DownloadStatus::Paused);
        assert_eq!(item.download_speed, IDLE_SPEED);
        assert!(!item.update_progress(ProgressSample::new(900, 1000, 100.0)));
        assert_eq!(item.progress, 50.0, "paused items keep their progress");

        item.resume().unwrap();
        assert_eq!(item.status, DownloadStatus::Downloading);
    }

    #[test]
    fn test_failure_keeps_message() {
        let mut item = sample_item();
        item.start().unwrap();
        item.fail("Connection lost").unwrap();
        assert_eq!(item.status, DownloadStatus::Error);
        assert_eq!(item.error.as_deref(), Some("Connection lost"));
        assert_eq!(item.estimated_time, ETA_ERROR);
    }

    #[test]
    fn test_terminal_states_reject_transitions() {
        let mut item = sample_item();
        item.start().unwrap();
        item.complete().unwrap();

        assert!(item.start().is_err());
        assert!(item.pause().is_err());
        assert!(item.fail("late").is_err());
        assert_eq!(item.status, DownloadStatus::Completed);
        assert!(item.error.is_none());
    }

    #[test]
    fn test_stalled_progress_keeps_eta_unknown() {
        let mut item = sample_item();
        item.start().unwrap();
        assert!(item.update_progress(ProgressSample::new(0, 10_000_000, 1e-15)));
        assert_eq!(item.estimated_time, ETA_UNKNOWN);
        assert_eq!(item.status, DownloadStatus::Downloading);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(DownloadStatus::Completed.is_terminal());
        assert!(DownloadStatus::Error.is_terminal());
        assert!(!DownloadStatus::Paused.is_terminal());
        assert!(!DownloadStatus::Error.can_transition_to(DownloadStatus::Downloading));
        assert!(!DownloadStatus::Completed.can_transition_to(DownloadStatus::Error));
    }

    #[test]
    fn test_illegal_transitions() {
        let mut item = sample_item();
        assert!(item.pause().is_err(), "cannot pause before starting");
        assert!(item.resume().is_err(), "cannot resume what is not paused");
        assert!(item.complete().is_err(), "cannot complete without downloading");
        assert_eq!(item.status, DownloadStatus::Pending);

        item.start().unwrap();
        assert!(item.resume().is_err());
        assert!(matches!(
            item.start(),
            Err(TubegrabError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&DownloadStatus::Downloading).unwrap();
        assert_eq!(json, "\"downloading\"");

        let item = sample_item();
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["status"], "pending");
        assert_eq!(value["downloadSpeed"], IDLE_SPEED);
        assert!(value.get("error").is_none());
    }
}

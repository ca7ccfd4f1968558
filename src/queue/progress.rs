//! Progress figures and their display labels

use std::time::Duration;

pub const IDLE_SPEED: &str = "0 MB/s";
pub const ETA_UNKNOWN: &str = "Calculating...";
pub const ETA_COMPLETE: &str = "Complete";
pub const ETA_ERROR: &str = "Error";

/// One progress report for a transfer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressSample {
    pub downloaded_bytes: u64,
    pub total_bytes: u64,
    /// bytes per second
    pub speed: f64,
}

impl ProgressSample {
    pub fn new(downloaded_bytes: u64, total_bytes: u64, speed: f64) -> Self {
        Self {
            downloaded_bytes,
            total_bytes,
            speed,
        }
    }

    /// Percentage complete, clamped to 0-100
    pub fn percentage(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        (self.downloaded_bytes as f64 / self.total_bytes as f64 * 100.0).clamp(0.0, 100.0)
    }

    /// Time left at the current speed, if it can be known
    pub fn eta(&self) -> Option<Duration> {
        if self.total_bytes > 0 && self.downloaded_bytes >= self.total_bytes {
            Some(Duration::from_secs(0))
        } else if self.speed > 0.0 && self.total_bytes > 0 {
            let remaining = self.total_bytes - self.downloaded_bytes;
            // Stalled transfers can produce quotients beyond what Duration holds
            Duration::try_from_secs_f64(remaining as f64 / self.speed).ok()
        } else {
            None
        }
    }
}

/// Render bytes per second as `X.X MB/s`
pub fn format_speed(bytes_per_second: f64) -> String {
    if !bytes_per_second.is_finite() || bytes_per_second <= 0.0 {
        return IDLE_SPEED.to_string();
    }
    format!("{:.1} MB/s", bytes_per_second / 1024.0 / 1024.0)
}

/// Render a remaining time as `45s`, `3m 5s` or `1h 2m`
pub fn format_eta(eta: Option<Duration>) -> String {
    let Some(eta) = eta else {
        return ETA_UNKNOWN.to_string();
    };

    let secs = eta.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
    }
}

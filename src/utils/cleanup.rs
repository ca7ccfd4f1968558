//! Periodic sweeping of the downloads scratch directory

use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// How often the sweeper wakes up
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(3600);

/// Remove entries under `dir` last modified before `now - max_age`.
///
/// Returns the number of entries removed. Entries that fail to delete are logged and skipped.
pub async fn sweep_stale_entries(dir: &Path, max_age: Duration) -> Result<usize> {
    let cutoff = SystemTime::now()
        .checked_sub(max_age)
        .unwrap_or(SystemTime::UNIX_EPOCH);

    let mut removed = 0;
    let mut entries = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let metadata = match entry.metadata().await {
            Ok(m) => m,
            Err(e) => {
                warn!("Cannot stat {}: {}", path.display(), e);
                continue;
            }
        };

        let modified = metadata.modified().unwrap_or(SystemTime::now());
        if modified >= cutoff {
            continue;
        }

        let result = if metadata.is_dir() {
            tokio::fs::remove_dir_all(&path).await
        } else {
            tokio::fs::remove_file(&path).await
        };

        match result {
            Ok(()) => {
                info!("Cleaned up old download entry: {}", path.display());
                removed += 1;
            }
            Err(e) => warn!("Failed to remove {}: {}", path.display(), e),
        }
    }

    Ok(removed)
}

/// Spawn the background sweeper for the downloads directory
pub fn spawn_sweeper(dir: PathBuf, max_age: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            match sweep_stale_entries(&dir, max_age).await {
                Ok(count) => debug!("Sweep of {} removed {} entries", dir.display(), count),
                Err(e) => warn!("Cleanup sweep of {} failed: {}", dir.display(), e),
            }
        }
    })
}

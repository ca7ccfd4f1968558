//! Client-side download queue

use crate::queue::item::{DownloadItem, DownloadStatus};
use crate::queue::progress::ProgressSample;
use crate::utils::error::{Result, TubegrabError};
use chrono::{Duration, Utc};
use std::collections::VecDeque;
use tracing::{debug, info};

/// Ordered list of download attempts, newest first
#[derive(Debug, Clone, Default)]
pub struct DownloadQueue {
    items: VecDeque<DownloadItem>,
}

impl DownloadQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add item to the front of the queue and return its id
    pub fn add(&mut self, item: DownloadItem) -> String {
        let id = item.id.clone();
        info!("Added download {} ({})", id, item.video.title);
        self.items.push_front(item);
        id
    }

    pub fn get(&self, id: &str) -> Option<&DownloadItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items(&self) -> impl Iterator<Item = &DownloadItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items currently in `status`
    pub fn count(&self, status: DownloadStatus) -> usize {
        self.items.iter().filter(|item| item.status == status).count()
    }

    fn item_mut(&mut self, id: &str) -> Result<&mut DownloadItem> {
        self.items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| TubegrabError::ItemNotFound(id.to_string()))
    }

    pub fn start(&mut self, id: &str) -> Result<()> {
        self.item_mut(id)?.start()?;
        debug!("Download {} started", id);
        Ok(())
    }

    pub fn pause(&mut self, id: &str) -> Result<()> {
        self.item_mut(id)?.pause()?;
        info!("Paused download {}", id);
        Ok(())
    }

    pub fn resume(&mut self, id: &str) -> Result<()> {
        self.item_mut(id)?.resume()?;
        info!("Resumed download {}", id);
        Ok(())
    }

    /// Returns whether the sample was applied (only downloading items take progress)
    pub fn update_progress(&mut self, id: &str, sample: ProgressSample) -> Result<bool> {
        Ok(self.item_mut(id)?.update_progress(sample))
    }

    pub fn complete(&mut self, id: &str) -> Result<()> {
        self.item_mut(id)?.complete()?;
        info!("Download {} completed", id);
        Ok(())
    }

    pub fn fail(&mut self, id: &str, error: impl Into<String>) -> Result<()> {
        let error = error.into();
        self.item_mut(id)?.fail(error.clone())?;
        info!("Download {} failed: {}", id, error);
        Ok(())
    }

    /// Remove an item in any state
    pub fn remove(&mut self, id: &str) -> Result<DownloadItem> {
        let position = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| TubegrabError::ItemNotFound(id.to_string()))?;

        self.items
            .remove(position)
            .ok_or_else(|| TubegrabError::ItemNotFound(id.to_string()))
    }

    /// Drop every completed item; returns how many were removed
    pub fn clear_completed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.status != DownloadStatus::Completed);
        let removed = before - self.items.len();
        info!("Cleared {} completed downloads", removed);
        removed
    }

    /// Drop completed items that finished more than `older_than` ago
    pub fn cleanup_completed(&mut self, older_than: Duration) -> usize {
        let cutoff = Utc::now() - older_than;
        let before = self.items.len();
        self.items.retain(|item| {
            !(item.status == DownloadStatus::Completed
                && item.completed_at.map(|at| at < cutoff).unwrap_or(false))
        });
        before - self.items.len()
    }
}

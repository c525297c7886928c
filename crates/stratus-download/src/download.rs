//! Download data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub type DownloadId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    /// Accepted, no bytes received yet
    Starting,
    /// Bytes arriving
    Downloading,
    /// Finished successfully
    Completed,
    /// Interrupted by the engine or network
    Failed,
    /// Cancelled by the user
    Cancelled,
}

impl DownloadStatus {
    /// Map the engine's download state code
    pub fn from_state_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(DownloadStatus::Starting),
            1 => Some(DownloadStatus::Downloading),
            2 => Some(DownloadStatus::Completed),
            3 => Some(DownloadStatus::Cancelled),
            4 => Some(DownloadStatus::Failed),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DownloadStatus::Completed | DownloadStatus::Failed | DownloadStatus::Cancelled
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadStatus::Starting => "starting",
            DownloadStatus::Downloading => "downloading",
            DownloadStatus::Completed => "completed",
            DownloadStatus::Failed => "failed",
            DownloadStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for DownloadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A download offered by the rendering engine, awaiting a decision
pub trait DownloadRequest {
    fn suggested_filename(&self) -> String;
    fn accept(&mut self, path: &Path);
    fn reject(&mut self);
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRecord {
    pub id: DownloadId,
    pub filename: String,
    pub path: PathBuf,
    /// Unknown until the engine reports it
    pub total_size: Option<u64>,
    pub received_bytes: u64,
    pub status: DownloadStatus,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl DownloadRecord {
    pub fn new(filename: String, path: PathBuf) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            filename,
            path,
            total_size: None,
            received_bytes: 0,
            status: DownloadStatus::Starting,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Download progress as a percentage (0-100). Unknown size reads as 0.
    pub fn progress(&self) -> f64 {
        match self.total_size {
            Some(total) if total > 0 => {
                (self.received_bytes as f64 / total as f64 * 100.0).min(100.0)
            }
            _ => 0.0,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == DownloadStatus::Completed
    }

    pub(crate) fn set_status(&mut self, status: DownloadStatus) {
        self.status = status;
        self.finished_at = status.is_terminal().then(Utc::now);
    }
}

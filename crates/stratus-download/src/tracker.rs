//! Download tracker

use std::path::{Path, PathBuf};

use crate::download::{DownloadId, DownloadRecord, DownloadRequest, DownloadStatus};
use crate::error::DownloadError;
use crate::Result;

pub struct DownloadTracker {
    /// Start order doubles as display order
    records: Vec<DownloadRecord>,
    download_dir: PathBuf,
}

impl DownloadTracker {
    pub fn new(download_dir: PathBuf) -> Self {
        Self {
            records: Vec::new(),
            download_dir,
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Accept an engine download into the download directory. A request
    /// that would write over a file still being downloaded is rejected.
    pub fn accept(&mut self, request: &mut dyn DownloadRequest) -> Option<DownloadId> {
        let filename = sanitize_file_name(&request.suggested_filename());
        let path = self.download_dir.join(&filename);

        if self.active().any(|d| d.path == path) {
            tracing::warn!(path = %path.display(), "Download target busy, rejecting");
            request.reject();
            return None;
        }

        request.accept(&path);
        Some(self.start(filename, path))
    }

    /// Begin tracking a download
    pub fn start(&mut self, filename: String, path: PathBuf) -> DownloadId {
        let record = DownloadRecord::new(filename, path);
        let id = record.id.clone();

        tracing::info!(
            download_id = %id,
            filename = %record.filename,
            path = %record.path.display(),
            "Started download"
        );

        self.records.push(record);
        id
    }

    pub fn on_progress(&mut self, id: &str, received: u64, total: Option<u64>) -> Result<()> {
        let record = self.get_mut(id)?;

        record.received_bytes = received;
        if total.is_some() {
            record.total_size = total;
        }
        if record.status == DownloadStatus::Starting {
            record.set_status(DownloadStatus::Downloading);
        }

        tracing::trace!(download_id = %id, received, total = ?total, "Download progress");
        Ok(())
    }

    /// Apply an engine state code. Unknown codes are ignored.
    pub fn on_state_changed(&mut self, id: &str, code: i32) -> Result<()> {
        let record = self.get_mut(id)?;

        let Some(status) = DownloadStatus::from_state_code(code) else {
            tracing::warn!(download_id = %id, code, "Unknown download state code");
            return Ok(());
        };

        record.set_status(status);
        tracing::info!(download_id = %id, status = %status, "Download state changed");
        Ok(())
    }

    /// Settle a download the engine reports as finished
    pub fn on_finished(&mut self, id: &str) -> Result<()> {
        let record = self.get_mut(id)?;
        if record.status.is_terminal() {
            return Ok(());
        }

        let complete = record
            .total_size
            .map_or(true, |total| record.received_bytes >= total);

        if complete {
            record.set_status(DownloadStatus::Completed);
            tracing::info!(download_id = %id, filename = %record.filename, "Completed download");
        } else {
            record.set_status(DownloadStatus::Failed);
            tracing::warn!(
                download_id = %id,
                received = record.received_bytes,
                total = ?record.total_size,
                "Download finished short"
            );
        }
        Ok(())
    }

    /// Remove completed records. Returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.records.len();
        self.records.retain(|d| !d.is_complete());
        let removed = before - self.records.len();

        tracing::info!(removed, "Cleared completed downloads");
        removed
    }

    pub fn list(&self) -> &[DownloadRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Result<&DownloadRecord> {
        self.records
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| DownloadError::NotFound(id.to_string()))
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut DownloadRecord> {
        self.records
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| DownloadError::NotFound(id.to_string()))
    }

    /// Downloads not yet settled
    pub fn active(&self) -> impl Iterator<Item = &DownloadRecord> {
        self.records.iter().filter(|d| !d.status.is_terminal())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Reduce a suggested name to a bare file name
pub fn sanitize_file_name(file_name: &str) -> String {
    let name = Path::new(file_name.trim())
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("download")
        .trim();

    if name.is_empty() {
        "download".to_string()
    } else {
        name.to_string()
    }
}

//! Stratus Download Tracker
//!
//! - Downloads are negotiated by the rendering engine; this crate only
//!   tracks them
//! - One record per accepted download, kept in start order for display
//! - Records leave the list only through "clear completed"

mod download;
mod error;
mod tracker;

pub use download::{DownloadId, DownloadRecord, DownloadRequest, DownloadStatus};
pub use error::DownloadError;
pub use tracker::{sanitize_file_name, DownloadTracker};

pub type Result<T> = std::result::Result<T, DownloadError>;

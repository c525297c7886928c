//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] stratus_storage::StorageError),

    #[error("Tab error: {0}")]
    Tab(#[from] stratus_tabs::TabError),

    #[error("Session error: {0}")]
    Session(#[from] stratus_session::SessionError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] stratus_navigation::NavigationError),

    #[error("Download error: {0}")]
    Download(#[from] stratus_download::DownloadError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Blocked navigation to {url} (matches {domain})")]
    Blocked { url: String, domain: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

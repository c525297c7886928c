//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(#[from] stratus_storage::StorageError),

    #[error("Tab error: {0}")]
    Tab(#[from] stratus_tabs::TabError),

    #[error("Failed to persist session to {path}: {source}")]
    Persist {
        path: String,
        #[source]
        source: stratus_storage::StorageError,
    },
}

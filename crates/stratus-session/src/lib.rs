//! Stratus Session Management
//!
//! - The window's tabs live in one ordered collection that is never empty
//! - The session is written wholesale to the state file on shutdown
//! - Startup restores the tabs and the history log from that file
//! - A missing or unreadable file starts a fresh session

mod error;
mod manager;
mod snapshot;

pub use error::SessionError;
pub use manager::{SessionManager, DEFAULT_HOMEPAGE, STATIC_PAGE_URL};
pub use snapshot::{SessionSnapshot, SnapshotTab};

pub type Result<T> = std::result::Result<T, SessionError>;

//! Stratus Storage Layer
//!
//! Two durable stores back the browser:
//! - a SQLite `settings` table for user preferences
//! - a single JSON state file holding the last session, written wholesale

mod database;
mod error;
mod migrations;
mod state_file;

pub use database::Database;
pub use error::StorageError;
pub use state_file::StateFile;

pub type Result<T> = std::result::Result<T, StorageError>;

//! Tab error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Tab not found: {0}")]
    NotFound(String),

    #[error("Tab index out of range: {index} (have {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Tab {0} shows static content and cannot navigate")]
    NotNavigable(String),
}

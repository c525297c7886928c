//! Stratus Privacy Protection
//!
//! Navigation to known tracker domains is refused. The match is a plain
//! substring test against the whole URL.

mod tracking;

pub use tracking::{TrackingProtection, DEFAULT_BLOCKED_DOMAINS};

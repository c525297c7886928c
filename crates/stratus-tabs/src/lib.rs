//! Stratus Tab Management
//!
//! Tabs live in an ordered collection with exactly one focused tab. Each tab
//! owns its content provider: a live rendering-engine view, or a static page
//! rendered by the browser itself (e.g. the history page).

mod content;
mod error;
mod manager;
mod state;
mod tab;

#[cfg(test)]
mod test_utils;

pub use content::{EngineFactory, PageView, StaticPage, TabContent};
pub use error::TabError;
pub use manager::TabManager;
pub use state::TabState;
pub use tab::{Tab, TabId, FAILURE_PAGE};

pub type Result<T> = std::result::Result<T, TabError>;

//! Tab State Machine
//!
//! ```text
//! Created
//!   ↓ load started
//! Loading ──load failed──▶ Failed
//!   ↓ load finished          │
//! Loaded ◀───────────────────┘ (via Loading on retry)
//!   ↺ reload / navigation re-enters Loading
//! ```
//!
//! Closing is not a state: a closed tab leaves the collection.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabState {
    /// Tab exists but the engine has not started loading
    Created,
    /// Engine is fetching the page
    Loading,
    /// Page finished loading
    Loaded,
    /// Engine reported a load failure; the failure page is shown
    Failed,
}

impl TabState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: TabState) -> bool {
        match (self, target) {
            (TabState::Created, TabState::Loading) => true,
            (TabState::Loading, TabState::Loaded) => true,
            (TabState::Loading, TabState::Failed) => true,
            // Reload or navigation
            (TabState::Loaded, TabState::Loading) => true,
            // Retry after failure
            (TabState::Failed, TabState::Loading) => true,
            (a, b) if *a == b => true,
            _ => false,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, TabState::Loading)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TabState::Created => "created",
            TabState::Loading => "loading",
            TabState::Loaded => "loaded",
            TabState::Failed => "failed",
        }
    }
}

impl std::fmt::Display for TabState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

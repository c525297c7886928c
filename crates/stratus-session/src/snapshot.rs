//! Session snapshot
//!
//! The on-disk form of a session: the open tabs plus the history log and its
//! word-frequency index.

use serde::{Deserialize, Serialize};
use stratus_navigation::{FrequencyIndex, VisitRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotTab {
    pub url: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    #[serde(default)]
    pub tabs: Vec<SnapshotTab>,
    #[serde(default)]
    pub history: Vec<VisitRecord>,
    #[serde(default)]
    pub frequency: FrequencyIndex,
}

impl SessionSnapshot {
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty() && self.history.is_empty()
    }
}

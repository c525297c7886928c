//! Tab Manager
//!
//! Owns the ordered tab collection and the focused position. A tab's index
//! is its position in the strip.

use crate::error::TabError;
use crate::tab::{Tab, TabId};
use crate::Result;

#[derive(Debug, Default)]
pub struct TabManager {
    tabs: Vec<Tab>,
    active: Option<usize>,
}

impl TabManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tab and focus it. Returns its index.
    pub fn open(&mut self, tab: Tab) -> usize {
        tracing::info!(tab_id = %tab.id, url = %tab.url, "Opened tab");

        self.tabs.push(tab);
        let index = self.tabs.len() - 1;
        self.active = Some(index);
        index
    }

    /// Close the tab at `index`. The last remaining tab cannot be closed;
    /// that and an out-of-range index are silent no-ops returning `false`.
    pub fn close(&mut self, index: usize) -> bool {
        if self.tabs.len() <= 1 || index >= self.tabs.len() {
            return false;
        }

        let tab = self.tabs.remove(index);
        tracing::info!(tab_id = %tab.id, index, "Closed tab");

        self.active = self.active.map(|active| {
            if active == index {
                index.min(self.tabs.len() - 1)
            } else if active > index {
                active - 1
            } else {
                active
            }
        });

        true
    }

    /// Remove every tab. Only used while rebuilding a session.
    pub fn clear(&mut self) {
        self.tabs.clear();
        self.active = None;
    }

    pub fn focus(&mut self, index: usize) -> Result<&Tab> {
        let len = self.tabs.len();
        if index >= len {
            return Err(TabError::IndexOutOfRange { index, len });
        }

        self.active = Some(index);
        Ok(&self.tabs[index])
    }

    /// Focus the next tab, wrapping from last to first
    pub fn focus_next(&mut self) -> Option<usize> {
        let len = self.tabs.len();
        let next = (self.active? + 1) % len;
        self.active = Some(next);
        Some(next)
    }

    /// Focus the previous tab, wrapping from first to last
    pub fn focus_prev(&mut self) -> Option<usize> {
        let len = self.tabs.len();
        let prev = (self.active? + len - 1) % len;
        self.active = Some(prev);
        Some(prev)
    }

    /// Move a tab to a new position; focus stays on the same tab
    pub fn move_tab(&mut self, from: usize, to: usize) -> Result<()> {
        let len = self.tabs.len();
        if from >= len {
            return Err(TabError::IndexOutOfRange { index: from, len });
        }

        let tab = self.tabs.remove(from);
        let to = to.min(self.tabs.len());
        self.tabs.insert(to, tab);

        self.active = self.active.map(|active| {
            if active == from {
                to
            } else if from < active && to >= active {
                active - 1
            } else if from > active && to <= active {
                active + 1
            } else {
                active
            }
        });

        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Tab> {
        self.tabs.get_mut(index)
    }

    pub fn position(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }

    pub fn by_id(&self, tab_id: &str) -> Result<&Tab> {
        self.tabs
            .iter()
            .find(|t| t.id == tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))
    }

    pub fn by_id_mut(&mut self, tab_id: &str) -> Result<&mut Tab> {
        self.tabs
            .iter_mut()
            .find(|t| t.id == tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&Tab> {
        self.active.and_then(|i| self.tabs.get(i))
    }

    pub fn active_mut(&mut self) -> Option<&mut Tab> {
        self.active.and_then(|i| self.tabs.get_mut(i))
    }

    pub fn active_id(&self) -> Option<TabId> {
        self.active().map(|t| t.id.clone())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

//! Address bar suggestions
//!
//! Candidates are every distinct history URL plus every word of the frequency
//! index, weighted by the frequency of the lowercased candidate. Ties are
//! broken by ascending lexical order so the ranking is fully deterministic.

use std::collections::BTreeSet;

use crate::history::HistoryStore;

#[derive(Debug, Clone, Default)]
pub struct SuggestionRanker {
    ranked: Vec<String>,
}

impl SuggestionRanker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank all candidates of a history store
    pub fn rank(history: &HistoryStore) -> Vec<String> {
        let frequency = history.frequency();

        let candidates: BTreeSet<&str> = history
            .records()
            .iter()
            .map(|r| r.url.as_str())
            .chain(frequency.words())
            .collect();

        // BTreeSet yields lexical order; the stable sort keeps it for ties
        let mut ranked: Vec<(&str, u64)> = candidates
            .into_iter()
            .map(|candidate| (candidate, frequency.count(candidate)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        ranked.into_iter().map(|(c, _)| c.to_string()).collect()
    }

    /// Recompute the cached ranking
    pub fn refresh(&mut self, history: &HistoryStore) {
        self.ranked = Self::rank(history);
        tracing::trace!(candidates = self.ranked.len(), "Refreshed suggestions");
    }

    pub fn ranked(&self) -> &[String] {
        &self.ranked
    }

    /// Cached candidates containing `prefix`, in rank order
    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<String> {
        let needle = prefix.trim().to_lowercase();
        self.ranked
            .iter()
            .filter(|c| c.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect()
    }
}

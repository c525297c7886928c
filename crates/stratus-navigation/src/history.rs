//! History management
//!
//! The history log is append-only: every completed navigation adds a record,
//! repeated visits are not merged. Each record also feeds a word-frequency
//! index used to rank address bar suggestions.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

use stratus_storage::StateFile;

use crate::label::display_label;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub url: String,
    pub title: String,
    pub timestamp: DateTime<Utc>,
}

impl VisitRecord {
    /// Human-readable label for history listings
    pub fn label(&self) -> String {
        display_label(&self.url, &self.title)
    }
}

/// Split text into lowercase alphanumeric words.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
}

/// Word → occurrence count across all recorded URLs and titles
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyIndex {
    counts: BTreeMap<String, u64>,
}

impl FrequencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_text(&mut self, text: &str) {
        for word in tokenize(text) {
            *self.counts.entry(word).or_insert(0) += 1;
        }
    }

    pub fn add_visit(&mut self, record: &VisitRecord) {
        self.add_text(&record.url);
        self.add_text(&record.title);
    }

    /// Count for a word, looked up case-insensitively
    pub fn count(&self, word: &str) -> u64 {
        self.counts
            .get(&word.to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    fn from_history(records: &[VisitRecord]) -> Self {
        let mut index = Self::new();
        for record in records {
            index.add_visit(record);
        }
        index
    }
}

impl FromIterator<(String, u64)> for FrequencyIndex {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        Self {
            counts: iter.into_iter().collect(),
        }
    }
}

/// Standalone on-disk form of the history store
#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryDocument {
    #[serde(default)]
    history: Vec<VisitRecord>,
    #[serde(default)]
    frequency: FrequencyIndex,
}

#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    records: Vec<VisitRecord>,
    frequency: FrequencyIndex,
    dirty: bool,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted parts. The frequency index is always
    /// recomputed from the records; a persisted index that disagrees is
    /// reported and discarded.
    pub fn from_parts(records: Vec<VisitRecord>, persisted: &FrequencyIndex) -> Self {
        let frequency = FrequencyIndex::from_history(&records);

        if !persisted.is_empty() && *persisted != frequency {
            tracing::warn!(
                persisted_words = persisted.len(),
                rebuilt_words = frequency.len(),
                "Persisted frequency index disagrees with history, rebuilt from history"
            );
        }

        Self {
            records,
            frequency,
            dirty: false,
        }
    }

    /// Record a visit stamped with the current time
    pub fn record(&mut self, url: &str, title: &str) -> bool {
        self.record_at(url, title, Utc::now())
    }

    /// Record a visit. Empty, unparseable and transient (`data:`, `about:`)
    /// URLs are ignored and return `false`.
    pub fn record_at(&mut self, url: &str, title: &str, timestamp: DateTime<Utc>) -> bool {
        let url = url.trim();
        if url.is_empty() || is_transient(url) || Url::parse(url).is_err() {
            tracing::trace!(url = %url, "Skipping history record");
            return false;
        }

        let record = VisitRecord {
            url: url.to_string(),
            title: title.to_string(),
            timestamp,
        };

        self.frequency.add_visit(&record);
        self.records.push(record);
        self.dirty = true;

        tracing::debug!(url = %url, total = self.records.len(), "Recorded visit");
        true
    }

    /// Records in insertion order
    pub fn records(&self) -> &[VisitRecord] {
        &self.records
    }

    pub fn frequency(&self) -> &FrequencyIndex {
        &self.frequency
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// All records, newest first. Equal timestamps keep insertion order.
    pub fn list_recent(&self) -> Vec<VisitRecord> {
        let mut records = self.records.clone();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records
    }

    /// Search history by query (case-insensitive substring of url or title)
    pub fn search(&self, query: &str, limit: usize) -> Vec<VisitRecord> {
        let needle = query.to_lowercase();
        self.list_recent()
            .into_iter()
            .filter(|r| {
                r.url.to_lowercase().contains(&needle) || r.title.to_lowercase().contains(&needle)
            })
            .take(limit)
            .collect()
    }

    /// Write the store to its own state file
    pub fn persist(&mut self, file: &StateFile) -> Result<()> {
        let document = HistoryDocument {
            history: self.records.clone(),
            frequency: self.frequency.clone(),
        };
        file.write(&document)?;
        self.dirty = false;
        Ok(())
    }

    /// Load a store from a state file. A missing file yields an empty store.
    pub fn restore(file: &StateFile) -> Result<Self> {
        let document: HistoryDocument = file.read()?.unwrap_or_default();
        Ok(Self::from_parts(document.history, &document.frequency))
    }
}

fn is_transient(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("data:") || lower.starts_with("about:")
}

/// A run of consecutive records sharing a day label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup {
    pub label: String,
    pub records: Vec<VisitRecord>,
}

/// Partition time-sorted records into labelled day buckets.
///
/// A new bucket starts whenever the label differs from the previous record's,
/// so a label recurring later in the input produces a second bucket. Day
/// differences are computed in the timezone of `now`.
pub fn group_by_day<Tz: TimeZone>(records: &[VisitRecord], now: &DateTime<Tz>) -> Vec<DayGroup> {
    let tz = now.timezone();
    let today = now.date_naive();
    let mut groups: Vec<DayGroup> = Vec::new();

    for record in records {
        let date = record.timestamp.with_timezone(&tz).date_naive();
        let label = day_label(date, today);

        match groups.last_mut() {
            Some(group) if group.label == label => group.records.push(record.clone()),
            _ => groups.push(DayGroup {
                label,
                records: vec![record.clone()],
            }),
        }
    }

    groups
}

fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    match (today - date).num_days() {
        i64::MIN..=0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => date.format("%A").to_string(),
        7..=29 => "Last Month".to_string(),
        _ => date.format("%B %Y").to_string(),
    }
}

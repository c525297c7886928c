//! URL → captured page text

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

pub const DEFAULT_TTL_SECS: i64 = 60 * 60;

#[derive(Debug, Clone)]
struct CacheEntry {
    content: String,
    captured_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct PageCache {
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
}

impl PageCache {
    pub fn new() -> Self {
        Self::with_ttl(Duration::seconds(DEFAULT_TTL_SECS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn put(&mut self, url: &str, content: String) {
        self.put_at(url, content, Utc::now());
    }

    /// Store content for a URL, replacing any previous capture
    pub fn put_at(&mut self, url: &str, content: String, captured_at: DateTime<Utc>) {
        tracing::debug!(url = %url, bytes = content.len(), "Cached page");
        self.entries.insert(
            url.to_string(),
            CacheEntry {
                content,
                captured_at,
            },
        );
    }

    /// Content for a URL, unless it has outlived the TTL at `now`
    pub fn get(&self, url: &str, now: DateTime<Utc>) -> Option<&str> {
        self.entries
            .get(url)
            .filter(|entry| !self.is_expired(entry, now))
            .map(|entry| entry.content.as_str())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    /// Drop every entry older than the TTL. Returns the number removed.
    pub fn sweep(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| now.signed_duration_since(entry.captured_at) <= ttl);

        let removed = before - self.entries.len();
        if removed > 0 {
            tracing::info!(removed, remaining = self.entries.len(), "Swept page cache");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_expired(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.captured_at) > self.ttl
    }
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new()
    }
}

//! Tracking protection

use std::collections::BTreeSet;

/// Domains blocked out of the box
pub const DEFAULT_BLOCKED_DOMAINS: &[&str] = &[
    // Google
    "doubleclick.net",
    "google-analytics.com",
    "googleadservices.com",
    "googlesyndication.com",
    "googletagmanager.com",
    // Facebook
    "connect.facebook.net",
    // Ad exchanges
    "adnxs.com",
    "advertising.com",
    "criteo.com",
    "outbrain.com",
    "taboola.com",
    "scorecardresearch.com",
    // Analytics
    "hotjar.com",
    "mixpanel.com",
    "quantserve.com",
];

pub struct TrackingProtection {
    blocked_domains: BTreeSet<String>,
    enabled: bool,
}

impl TrackingProtection {
    pub fn new() -> Self {
        Self {
            blocked_domains: DEFAULT_BLOCKED_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            enabled: true,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Add a domain to block list
    pub fn block_domain(&mut self, domain: &str) {
        let domain = domain.trim().to_lowercase();
        if !domain.is_empty() {
            self.blocked_domains.insert(domain);
        }
    }

    /// Replace the block list
    pub fn set_blocked_domains<I>(&mut self, domains: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.blocked_domains = domains
            .into_iter()
            .map(|d| d.trim().to_lowercase())
            .filter(|d| !d.is_empty())
            .collect();

        tracing::info!(count = self.blocked_domains.len(), "Updated blocked domains");
    }

    pub fn blocked_domains(&self) -> impl Iterator<Item = &str> {
        self.blocked_domains.iter().map(String::as_str)
    }

    pub fn blocked_domain_count(&self) -> usize {
        self.blocked_domains.len()
    }

    /// The listed domain a URL matches, if protection is on
    pub fn matching_domain(&self, url: &str) -> Option<&str> {
        if !self.enabled {
            return None;
        }

        let url = url.to_lowercase();
        self.blocked_domains
            .iter()
            .find(|d| url.contains(d.as_str()))
            .map(String::as_str)
    }

    /// Check if a URL should be blocked
    pub fn should_block(&self, url: &str) -> bool {
        self.matching_domain(url).is_some()
    }
}

impl Default for TrackingProtection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_list() {
        let protection = TrackingProtection::new();
        assert_eq!(protection.blocked_domain_count(), DEFAULT_BLOCKED_DOMAINS.len());
        assert!(protection.should_block("https://stats.g.doubleclick.net/collect"));
        assert!(protection.should_block("https://www.Google-Analytics.com/ga.js"));
        assert!(!protection.should_block("https://example.com/page"));
    }

    #[test]
    fn test_substring_match() {
        let mut protection = TrackingProtection::new();
        protection.set_blocked_domains(vec!["tracker.com".to_string()]);

        assert!(protection.should_block("https://tracker.com/pixel.gif"));
        assert!(protection.should_block("https://sub.tracker.com/script.js"));
        // Anywhere in the URL counts
        assert!(protection.should_block("https://example.com/?next=tracker.com"));
        assert_eq!(
            protection.matching_domain("https://tracker.com/"),
            Some("tracker.com")
        );
    }

    #[test]
    fn test_block_domain() {
        let mut protection = TrackingProtection::new();
        protection.set_blocked_domains(Vec::new());
        assert!(!protection.should_block("https://ads.example.net/"));

        protection.block_domain(" Ads.Example.net ");
        protection.block_domain("");
        assert_eq!(protection.blocked_domain_count(), 1);
        assert!(protection.should_block("https://ads.example.net/"));
    }

    #[test]
    fn test_disabled() {
        let mut protection = TrackingProtection::new();
        protection.set_enabled(false);
        assert!(!protection.is_enabled());
        assert!(!protection.should_block("https://doubleclick.net/"));
    }
}

//! Input resolution for address bar
//!
//! 1. Explicit scheme or `www.` prefix → navigate as typed
//! 2. Looks like a domain → navigate over https
//! 3. Anything else → search

use regex::Regex;
use std::sync::OnceLock;
use url::form_urlencoded;

pub const DEFAULT_SEARCH_ENGINE: &str = "https://www.google.com/search?q=%s";

fn direct_prefix_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        Regex::new(r"^(http://|https://|www\.)").expect("direct prefix regex must compile")
    })
}

fn bare_domain_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| Regex::new(r"\w+\.\w+").expect("bare domain regex must compile"))
}

/// Result of resolving address bar input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResolution {
    /// Input is already a URL (or a `www.` host the engine resolves)
    Direct(String),
    /// Input looked like a domain and was given an https scheme
    Inferred(String),
    /// Search-engine query URL
    Search(String),
}

impl InputResolution {
    /// The URL to hand to the rendering engine
    pub fn url(&self) -> &str {
        match self {
            InputResolution::Direct(url)
            | InputResolution::Inferred(url)
            | InputResolution::Search(url) => url,
        }
    }

    pub fn into_url(self) -> String {
        match self {
            InputResolution::Direct(url)
            | InputResolution::Inferred(url)
            | InputResolution::Search(url) => url,
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, InputResolution::Search(_))
    }
}

#[derive(Debug, Clone)]
pub struct InputResolver {
    /// Search engine URL template (%s replaced with query)
    search_template: String,
}

impl InputResolver {
    pub fn new() -> Self {
        Self::with_search_engine(DEFAULT_SEARCH_ENGINE.to_string())
    }

    pub fn with_search_engine(template: String) -> Self {
        Self {
            search_template: template,
        }
    }

    pub fn set_search_engine(&mut self, template: String) {
        self.search_template = template;
    }

    pub fn search_template(&self) -> &str {
        &self.search_template
    }

    /// Resolve user input into a navigation target. Every input resolves;
    /// empty input becomes a search for the empty term.
    pub fn resolve(&self, input: &str) -> InputResolution {
        let input = input.trim();

        if direct_prefix_regex().is_match(input) {
            return InputResolution::Direct(input.to_string());
        }

        if bare_domain_regex().is_match(input) {
            return InputResolution::Inferred(format!("https://{}", input));
        }

        InputResolution::Search(self.build_search_url(input))
    }

    /// Build search URL from query
    fn build_search_url(&self, query: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
        self.search_template.replace("%s", &encoded)
    }
}

impl Default for InputResolver {
    fn default() -> Self {
        Self::new()
    }
}

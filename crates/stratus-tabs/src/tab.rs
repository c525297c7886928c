//! Tab data structure

use chrono::{DateTime, Utc};
use stratus_cache::PendingCapture;
use uuid::Uuid;

use crate::content::{PageView, StaticPage, TabContent};
use crate::error::TabError;
use crate::state::TabState;
use crate::Result;

pub type TabId = String;

/// Shown in place of a page the engine failed to load
pub const FAILURE_PAGE: &str = "<!DOCTYPE html>\
<html><head><title>Page failed to load</title></head>\
<body><h1>This page couldn't be loaded</h1>\
<p>Check the address or your connection, then reload.</p></body></html>";

#[derive(Debug)]
pub struct Tab {
    /// Unique identifier
    pub id: TabId,
    /// Current URL
    pub url: String,
    /// Page title, empty until the page sets one
    pub title: String,
    /// Favicon reference if available
    pub icon: Option<String>,
    /// Current state in the load state machine
    pub state: TabState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    content: TabContent,
}

impl Tab {
    /// Create a tab backed by an engine view and start loading `url`
    pub fn live(url: String, mut view: Box<dyn PageView>) -> Result<Self> {
        if url.trim().is_empty() {
            return Err(TabError::InvalidUrl("URL cannot be empty".to_string()));
        }

        view.load(&url);
        Ok(Self::with_content(url, TabState::Created, TabContent::Live(view)))
    }

    /// Create a tab showing browser-generated HTML
    pub fn static_page(url: String, title: String, html: String) -> Self {
        let mut tab = Self::with_content(
            url,
            TabState::Loaded,
            TabContent::Static(StaticPage { html }),
        );
        tab.title = title;
        tab
    }

    fn with_content(url: String, state: TabState, content: TabContent) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            url,
            title: String::new(),
            icon: None,
            state,
            created_at: now,
            updated_at: now,
            content,
        }
    }

    pub fn content(&self) -> &TabContent {
        &self.content
    }

    pub fn is_static(&self) -> bool {
        self.content.is_static()
    }

    /// Attempt to transition to a new state
    pub fn transition_to(&mut self, new_state: TabState) -> Result<()> {
        if !self.state.can_transition_to(new_state) {
            return Err(TabError::InvalidTransition {
                from: self.state.to_string(),
                to: new_state.to_string(),
            });
        }

        tracing::debug!(
            tab_id = %self.id,
            from = %self.state,
            to = %new_state,
            "Tab state transition"
        );

        self.state = new_state;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn begin_loading(&mut self) -> Result<()> {
        self.transition_to(TabState::Loading)
    }

    /// Settle a load. A failed load swaps in the failure page.
    pub fn finish_loading(&mut self, success: bool) -> Result<()> {
        if !self.state.is_loading() {
            self.begin_loading()?;
        }

        if success {
            return self.transition_to(TabState::Loaded);
        }

        self.transition_to(TabState::Failed)?;
        if let Some(view) = self.content.view_mut() {
            view.show_html(FAILURE_PAGE);
        }
        tracing::warn!(tab_id = %self.id, url = %self.url, "Page failed to load");
        Ok(())
    }

    /// Navigate to a new URL
    pub fn navigate(&mut self, url: String) -> Result<()> {
        if url.trim().is_empty() {
            return Err(TabError::InvalidUrl("URL cannot be empty".to_string()));
        }

        let Some(view) = self.content.view_mut() else {
            return Err(TabError::NotNavigable(self.id.clone()));
        };

        view.load(&url);
        self.url = url;
        self.title = String::new(); // Reset title until page loads
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Record a URL change reported by the engine (redirects, in-page links)
    pub fn set_url(&mut self, url: String) {
        self.url = url;
        self.updated_at = Utc::now();
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
        self.updated_at = Utc::now();
    }

    pub fn set_icon(&mut self, icon: Option<String>) {
        self.icon = icon;
        self.updated_at = Utc::now();
    }

    pub fn back(&mut self) {
        if let Some(view) = self.content.view_mut() {
            view.back();
        }
    }

    pub fn forward(&mut self) {
        if let Some(view) = self.content.view_mut() {
            view.forward();
        }
    }

    pub fn reload(&mut self) {
        if let Some(view) = self.content.view_mut() {
            view.reload();
        }
    }

    /// Title reported by the engine, falling back to the URL
    pub fn page_title(&self) -> String {
        match self.content.view() {
            Some(view) => {
                let title = view.page_title();
                if title.is_empty() {
                    self.url.clone()
                } else {
                    title
                }
            }
            None => self.display_title().to_string(),
        }
    }

    /// Ask the engine for the page text. Static tabs have nothing to capture.
    pub fn request_page_text(&mut self, capture: PendingCapture) -> bool {
        match self.content.view_mut() {
            Some(view) => {
                view.request_page_text(capture);
                true
            }
            None => false,
        }
    }

    /// Get display title (with fallback to URL)
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.url
        } else {
            &self.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::RecordingView;
    use stratus_cache::capture_channel;

    #[test]
    fn test_new_live_tab_starts_loading_url() {
        let view = RecordingView::new();
        let log = view.log();
        let tab = Tab::live("https://example.com".to_string(), Box::new(view)).unwrap();

        assert_eq!(tab.state, TabState::Created);
        assert_eq!(tab.url, "https://example.com");
        assert!(tab.title.is_empty());
        assert!(!tab.is_static());
        assert_eq!(log.borrow().loads, vec!["https://example.com"]);
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = Tab::live(String::new(), Box::new(RecordingView::new()));
        assert!(matches!(result, Err(TabError::InvalidUrl(_))));
    }

    #[test]
    fn test_load_cycle() {
        let mut tab =
            Tab::live("https://example.com".to_string(), Box::new(RecordingView::new())).unwrap();

        tab.begin_loading().unwrap();
        assert!(tab.state.is_loading());
        tab.finish_loading(true).unwrap();
        assert_eq!(tab.state, TabState::Loaded);

        // Reload cycles back through Loading
        tab.begin_loading().unwrap();
        tab.finish_loading(true).unwrap();
        assert_eq!(tab.state, TabState::Loaded);
    }

    #[test]
    fn test_finish_without_start() {
        let mut tab =
            Tab::live("https://example.com".to_string(), Box::new(RecordingView::new())).unwrap();
        tab.finish_loading(true).unwrap();
        assert_eq!(tab.state, TabState::Loaded);
    }

    #[test]
    fn test_failed_load_shows_failure_page() {
        let view = RecordingView::new();
        let log = view.log();
        let mut tab = Tab::live("https://nope.invalid".to_string(), Box::new(view)).unwrap();

        tab.begin_loading().unwrap();
        tab.finish_loading(false).unwrap();

        assert_eq!(tab.state, TabState::Failed);
        assert_eq!(log.borrow().html.as_deref(), Some(FAILURE_PAGE));

        // Retry
        tab.begin_loading().unwrap();
        tab.finish_loading(true).unwrap();
        assert_eq!(tab.state, TabState::Loaded);
    }

    #[test]
    fn test_navigate_resets_title() {
        let view = RecordingView::new();
        let log = view.log();
        let mut tab = Tab::live("https://example.com".to_string(), Box::new(view)).unwrap();
        tab.set_title("Example".to_string());

        tab.navigate("https://rust-lang.org".to_string()).unwrap();
        assert_eq!(tab.url, "https://rust-lang.org");
        assert!(tab.title.is_empty());
        assert_eq!(tab.display_title(), "https://rust-lang.org");
        assert_eq!(
            log.borrow().loads,
            vec!["https://example.com", "https://rust-lang.org"]
        );
    }

    #[test]
    fn test_static_tab() {
        let mut tab = Tab::static_page(
            "stratus://history".to_string(),
            "History".to_string(),
            "<h1>History</h1>".to_string(),
        );

        assert!(tab.is_static());
        assert_eq!(tab.state, TabState::Loaded);
        assert_eq!(tab.page_title(), "History");
        assert!(matches!(
            tab.navigate("https://example.com".to_string()),
            Err(TabError::NotNavigable(_))
        ));

        let (sink, _receiver) = capture_channel();
        assert!(!tab.request_page_text(sink.request(&tab.url)));
    }

    #[test]
    fn test_page_title_falls_back_to_url() {
        let view = RecordingView::new();
        let log = view.log();
        let tab = Tab::live("https://openai.com".to_string(), Box::new(view)).unwrap();
        assert_eq!(tab.page_title(), "https://openai.com");

        log.borrow_mut().title = "OpenAI".to_string();
        assert_eq!(tab.page_title(), "OpenAI");
    }

    #[test]
    fn test_request_page_text_reaches_view() {
        let view = RecordingView::new();
        let log = view.log();
        let mut tab = Tab::live("https://example.com".to_string(), Box::new(view)).unwrap();

        let (sink, mut receiver) = capture_channel();
        assert!(tab.request_page_text(sink.request(&tab.url)));

        let capture = log.borrow_mut().captures.pop().unwrap();
        assert_eq!(capture.url(), "https://example.com");
        assert!(capture.deliver("Example".to_string()));
        assert_eq!(receiver.drain().len(), 1);
    }

    #[test]
    fn test_history_navigation_delegates() {
        let view = RecordingView::new();
        let log = view.log();
        let mut tab = Tab::live("https://example.com".to_string(), Box::new(view)).unwrap();

        tab.back();
        tab.forward();
        tab.reload();
        assert_eq!(log.borrow().commands, vec!["back", "forward", "reload"]);
    }
}

//! Tab content providers
//!
//! A tab does not care how its page is produced. Live tabs drive a rendering
//! engine view; static tabs hold HTML the browser generated itself.

use stratus_cache::PendingCapture;

/// The rendering engine's per-tab view.
pub trait PageView {
    fn load(&mut self, url: &str);
    fn back(&mut self);
    fn forward(&mut self);
    fn reload(&mut self);
    fn current_url(&self) -> String;
    fn page_title(&self) -> String;
    /// Serialize the page to text. The engine completes `capture` later, or
    /// never if it shuts down first.
    fn request_page_text(&mut self, capture: PendingCapture);
    /// Replace the displayed document with inline HTML
    fn show_html(&mut self, html: &str);
}

/// Creates engine views for new tabs
pub trait EngineFactory {
    fn create_view(&mut self) -> Box<dyn PageView>;
}

/// Browser-generated page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticPage {
    pub html: String,
}

pub enum TabContent {
    Live(Box<dyn PageView>),
    Static(StaticPage),
}

impl TabContent {
    pub fn is_static(&self) -> bool {
        matches!(self, TabContent::Static(_))
    }

    pub fn view(&self) -> Option<&dyn PageView> {
        match self {
            TabContent::Live(view) => Some(view.as_ref()),
            TabContent::Static(_) => None,
        }
    }

    pub fn view_mut(&mut self) -> Option<&mut (dyn PageView + 'static)> {
        match self {
            TabContent::Live(view) => Some(view.as_mut()),
            TabContent::Static(_) => None,
        }
    }
}

impl std::fmt::Debug for TabContent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TabContent::Live(_) => f.write_str("Live"),
            TabContent::Static(page) => f
                .debug_struct("Static")
                .field("bytes", &page.html.len())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::RecordingFactory;

    #[test]
    fn test_live_content_from_factory() {
        let mut factory = RecordingFactory::default();
        let mut content = TabContent::Live(factory.create_view());

        assert_eq!(factory.created, 1);
        assert!(!content.is_static());

        let view = content.view_mut().unwrap();
        view.load("https://example.com");
        assert_eq!(content.view().unwrap().current_url(), "https://example.com");
    }

    #[test]
    fn test_static_content_has_no_view() {
        let mut content = TabContent::Static(StaticPage {
            html: "<p>hi</p>".to_string(),
        });

        assert!(content.is_static());
        assert!(content.view().is_none());
        assert!(content.view_mut().is_none());
        assert_eq!(format!("{:?}", content), "Static { bytes: 9 }");
    }
}

//! Session Manager
//!
//! Owns the window's tab collection and moves it to and from the state file.

use stratus_navigation::{display_label, HistoryStore};
use stratus_storage::{StateFile, StorageError};
use stratus_tabs::{EngineFactory, Tab, TabManager};

use crate::error::SessionError;
use crate::snapshot::{SessionSnapshot, SnapshotTab};
use crate::Result;

pub const DEFAULT_HOMEPAGE: &str = "https://www.google.com";

/// URL carried by tabs that show browser-generated HTML
pub const STATIC_PAGE_URL: &str = "about:blank";

pub struct SessionManager {
    tabs: TabManager,
    homepage: String,
    factory: Box<dyn EngineFactory>,
}

impl SessionManager {
    pub fn new(homepage: String, factory: Box<dyn EngineFactory>) -> Self {
        Self {
            tabs: TabManager::new(),
            homepage,
            factory,
        }
    }

    pub fn homepage(&self) -> &str {
        &self.homepage
    }

    pub fn set_homepage(&mut self, homepage: String) {
        self.homepage = homepage;
    }

    pub fn tabs(&self) -> &TabManager {
        &self.tabs
    }

    pub fn tabs_mut(&mut self) -> &mut TabManager {
        &mut self.tabs
    }

    /// Open a live tab and focus it. `None` opens the homepage.
    pub fn open_tab(&mut self, url: Option<String>) -> Result<usize> {
        let url = url
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| self.homepage.clone());

        let tab = Tab::live(url, self.factory.create_view())?;
        Ok(self.tabs.open(tab))
    }

    /// Open a tab showing pre-rendered HTML
    pub fn open_static_tab(&mut self, title: String, html: String) -> usize {
        let tab = Tab::static_page(STATIC_PAGE_URL.to_string(), title, html);
        self.tabs.open(tab)
    }

    pub fn close_tab(&mut self, index: usize) -> bool {
        self.tabs.close(index)
    }

    pub fn focus(&mut self, index: usize) -> Result<()> {
        self.tabs.focus(index)?;
        Ok(())
    }

    pub fn focus_next(&mut self) -> Option<usize> {
        self.tabs.focus_next()
    }

    pub fn focus_prev(&mut self) -> Option<usize> {
        self.tabs.focus_prev()
    }

    pub fn move_tab(&mut self, from: usize, to: usize) -> Result<()> {
        self.tabs.move_tab(from, to)?;
        Ok(())
    }

    /// Capture live tabs and the history log. Static tabs are not persisted.
    pub fn snapshot(&self, history: &HistoryStore) -> SessionSnapshot {
        let tabs = self
            .tabs
            .iter()
            .filter(|t| !t.is_static())
            .map(|t| SnapshotTab {
                url: t.url.clone(),
                title: display_label(&t.url, &t.title),
            })
            .collect();

        SessionSnapshot {
            tabs,
            history: history.records().to_vec(),
            frequency: history.frequency().clone(),
        }
    }

    /// Replace the current tabs and history with a snapshot. A snapshot
    /// without usable tabs yields a single homepage tab, or a
    /// `DEFAULT_HOMEPAGE` tab when the homepage itself won't open. Focus
    /// lands on the first tab.
    pub fn restore(&mut self, snapshot: SessionSnapshot, history: &mut HistoryStore) -> Result<()> {
        let fresh = snapshot.is_empty();
        let SessionSnapshot {
            tabs,
            history: records,
            frequency,
        } = snapshot;

        let mut restored = Vec::with_capacity(tabs.len());
        for entry in tabs {
            match Tab::live(entry.url.clone(), self.factory.create_view()) {
                Ok(mut tab) => {
                    tab.set_title(entry.title);
                    restored.push(tab);
                }
                Err(e) => {
                    tracing::warn!(url = %entry.url, error = %e, "Skipping unrestorable tab");
                }
            }
        }

        if restored.is_empty() {
            restored.push(self.start_tab()?);
        }

        // The old tabs stay open until the replacements exist
        self.tabs.clear();
        for tab in restored {
            self.tabs.open(tab);
        }
        self.tabs.focus(0)?;
        *history = HistoryStore::from_parts(records, &frequency);

        tracing::info!(
            fresh,
            tab_count = self.tabs.len(),
            history_count = history.len(),
            "Restored session"
        );

        Ok(())
    }

    fn start_tab(&mut self) -> Result<Tab> {
        match Tab::live(self.homepage.clone(), self.factory.create_view()) {
            Ok(tab) => Ok(tab),
            Err(e) => {
                tracing::warn!(
                    homepage = %self.homepage,
                    error = %e,
                    "Homepage unusable, opening default start page"
                );
                Ok(Tab::live(DEFAULT_HOMEPAGE.to_string(), self.factory.create_view())?)
            }
        }
    }

    /// Read the state file. A missing or unreadable file degrades to an
    /// empty snapshot.
    pub fn load(file: &StateFile) -> SessionSnapshot {
        match file.read::<SessionSnapshot>() {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => {
                tracing::warn!(path = %file.path().display(), "No session state file, starting fresh");
                SessionSnapshot::default()
            }
            Err(e) => {
                tracing::warn!(
                    path = %file.path().display(),
                    error = %e,
                    "Session state file unreadable, starting fresh"
                );
                SessionSnapshot::default()
            }
        }
    }

    /// Write the session wholesale, retrying once on failure
    pub fn save(&self, file: &StateFile, history: &HistoryStore) -> Result<()> {
        let snapshot = self.snapshot(history);
        let path = file.path().display().to_string();

        write_with_retry(&path, || file.write(&snapshot))?;

        tracing::info!(
            path = %path,
            tab_count = snapshot.tabs.len(),
            history_count = snapshot.history.len(),
            "Saved session"
        );
        Ok(())
    }
}

fn write_with_retry<F>(path: &str, mut write: F) -> Result<()>
where
    F: FnMut() -> std::result::Result<(), StorageError>,
{
    if let Err(first) = write() {
        tracing::warn!(path = %path, error = %first, "Session write failed, retrying");

        if let Err(source) = write() {
            tracing::error!(path = %path, error = %source, "Session write failed twice");
            return Err(SessionError::Persist {
                path: path.to_string(),
                source,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use stratus_cache::PendingCapture;
    use stratus_tabs::PageView;

    struct NullView;

    impl PageView for NullView {
        fn load(&mut self, _url: &str) {}
        fn back(&mut self) {}
        fn forward(&mut self) {}
        fn reload(&mut self) {}
        fn current_url(&self) -> String {
            String::new()
        }
        fn page_title(&self) -> String {
            String::new()
        }
        fn request_page_text(&mut self, _capture: PendingCapture) {}
        fn show_html(&mut self, _html: &str) {}
    }

    struct NullFactory;

    impl EngineFactory for NullFactory {
        fn create_view(&mut self) -> Box<dyn PageView> {
            Box::new(NullView)
        }
    }

    fn manager() -> SessionManager {
        SessionManager::new(DEFAULT_HOMEPAGE.to_string(), Box::new(NullFactory))
    }

    fn urls(manager: &SessionManager) -> Vec<String> {
        manager.tabs().iter().map(|t| t.url.clone()).collect()
    }

    fn history() -> HistoryStore {
        let mut history = HistoryStore::new();
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        history.record_at("https://rust-lang.org", "Rust", at);
        history.record_at("https://docs.rs", "Docs.rs", at);
        history
    }

    #[test]
    fn test_open_tab_defaults_to_homepage() {
        let mut manager = manager();
        manager.open_tab(None).unwrap();
        manager.open_tab(Some("  ".to_string())).unwrap();
        manager.open_tab(Some("https://example.com".to_string())).unwrap();

        assert_eq!(
            urls(&manager),
            vec![DEFAULT_HOMEPAGE, DEFAULT_HOMEPAGE, "https://example.com"]
        );
        assert_eq!(manager.tabs().active_index(), Some(2));
    }

    #[test]
    fn test_snapshot_skips_static_tabs() {
        let mut manager = manager();
        manager.open_tab(Some("https://example.com".to_string())).unwrap();
        manager.open_static_tab("History".to_string(), "<h1>History</h1>".to_string());

        let snapshot = manager.snapshot(&history());
        assert_eq!(
            snapshot.tabs,
            vec![SnapshotTab {
                url: "https://example.com".to_string(),
                title: "Visited example.com".to_string(),
            }]
        );
        assert_eq!(snapshot.history.len(), 2);
        assert_eq!(snapshot.frequency.count("rust"), 2);
    }

    #[test]
    fn test_restore_empty_opens_one_tab() {
        let mut manager = manager();
        let mut history = history();

        manager
            .restore(SessionSnapshot::default(), &mut history)
            .unwrap();

        assert_eq!(urls(&manager), vec![DEFAULT_HOMEPAGE]);
        assert_eq!(manager.tabs().active_index(), Some(0));
        assert!(history.is_empty());
    }

    #[test]
    fn test_restore_with_blank_homepage_opens_default_start_page() {
        let mut manager = SessionManager::new("   ".to_string(), Box::new(NullFactory));
        let mut history = HistoryStore::new();

        manager
            .restore(SessionSnapshot::default(), &mut history)
            .unwrap();

        assert_eq!(urls(&manager), vec![DEFAULT_HOMEPAGE]);
        assert_eq!(manager.tabs().active_index(), Some(0));
    }

    #[test]
    fn test_restore_focuses_first_tab() {
        let mut manager = manager();
        let snapshot = SessionSnapshot {
            tabs: vec![
                SnapshotTab {
                    url: "https://a.com".to_string(),
                    title: "A".to_string(),
                },
                SnapshotTab {
                    url: String::new(),
                    title: String::new(),
                },
                SnapshotTab {
                    url: "https://b.com".to_string(),
                    title: "B".to_string(),
                },
            ],
            ..Default::default()
        };

        manager.restore(snapshot, &mut HistoryStore::new()).unwrap();

        assert_eq!(urls(&manager), vec!["https://a.com", "https://b.com"]);
        assert_eq!(manager.tabs().active_index(), Some(0));
        assert_eq!(manager.tabs().get(1).unwrap().title, "B");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let file = StateFile::new(dir.path().join("session.json"));

        let mut manager = manager();
        manager.open_tab(Some("https://example.com".to_string())).unwrap();
        manager.open_tab(Some("https://rust-lang.org".to_string())).unwrap();
        let history = history();
        manager.save(&file, &history).unwrap();

        let snapshot = SessionManager::load(&file);
        let mut restored = self::manager();
        let mut restored_history = HistoryStore::new();
        restored.restore(snapshot, &mut restored_history).unwrap();

        assert_eq!(
            urls(&restored),
            vec!["https://example.com", "https://rust-lang.org"]
        );
        assert_eq!(restored_history.records(), history.records());
        assert_eq!(restored_history.frequency(), history.frequency());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = StateFile::new(dir.path().join("missing.json"));
        assert!(SessionManager::load(&file).is_empty());
    }

    #[test]
    fn test_malformed_file_restores_default_tab() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();

        let snapshot = SessionManager::load(&StateFile::new(&path));
        assert!(snapshot.is_empty());

        let mut manager = manager();
        manager.restore(snapshot, &mut HistoryStore::new()).unwrap();
        assert_eq!(manager.tabs().len(), 1);
    }

    #[test]
    fn test_retry_once_then_succeed() {
        let mut attempts = 0;
        let result = write_with_retry("session.json", || {
            attempts += 1;
            if attempts == 1 {
                Err(StorageError::Io(std::io::Error::other("disk full")))
            } else {
                Ok(())
            }
        });

        assert!(result.is_ok());
        assert_eq!(attempts, 2);
    }

    #[test]
    fn test_persistent_failure_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let file = StateFile::new(blocker.join("session.json"));

        let mut manager = manager();
        manager.open_tab(None).unwrap();

        let result = manager.save(&file, &HistoryStore::new());
        assert!(matches!(result, Err(SessionError::Persist { .. })));
    }
}

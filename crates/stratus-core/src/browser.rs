//! Main browser state container
//!
//! Every piece of browser state is owned here and mutated from the control
//! thread. The rendering engine reports back through the `on_*` handlers.

use chrono::{DateTime, Duration, Local, Utc};

use stratus_cache::{capture_channel, CaptureReceiver, CaptureSink, PageCache, SweepSchedule};
use stratus_download::{DownloadId, DownloadRequest, DownloadTracker};
use stratus_navigation::{HistoryStore, InputResolver, SuggestionRanker};
use stratus_privacy::TrackingProtection;
use stratus_session::SessionManager;
use stratus_storage::{Database, StateFile};
use stratus_tabs::{EngineFactory, Tab, TabError, TabManager};

use crate::config::Config;
use crate::error::CoreError;
use crate::history_page::{render_history_page, HISTORY_PAGE_TITLE};
use crate::Result;

const SETTING_SEARCH_ENGINE: &str = "search_engine";
const SETTING_HOMEPAGE: &str = "homepage";
const SETTING_BLOCKED_DOMAINS: &str = "blocked_domains";

/// Main browser instance
pub struct Browser {
    config: Config,
    /// Preference store
    db: Database,
    state_file: StateFile,
    /// Tabs and their engine views
    session: SessionManager,
    history: HistoryStore,
    cache: PageCache,
    sweep: SweepSchedule,
    capture_sink: CaptureSink,
    captures: CaptureReceiver,
    downloads: DownloadTracker,
    suggestions: SuggestionRanker,
    tracking_protection: TrackingProtection,
    input_resolver: InputResolver,
}

impl Browser {
    /// Create a browser backed by the on-disk preference database
    pub fn new(config: Config, factory: Box<dyn EngineFactory>) -> Result<Self> {
        config.validate()?;

        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::open(&config.database_path)?;

        Ok(Self::with_database(config, db, factory))
    }

    /// Create a browser with an in-memory preference database
    pub fn in_memory(config: Config, factory: Box<dyn EngineFactory>) -> Result<Self> {
        config.validate()?;
        let db = Database::open_in_memory()?;
        Ok(Self::with_database(config, db, factory))
    }

    fn with_database(config: Config, db: Database, factory: Box<dyn EngineFactory>) -> Self {
        let (capture_sink, captures) = capture_channel();

        let mut tracking_protection = TrackingProtection::new();
        tracking_protection.set_enabled(config.tracking_protection);

        Self {
            state_file: StateFile::new(&config.state_file_path),
            session: SessionManager::new(config.homepage.clone(), factory),
            history: HistoryStore::new(),
            cache: PageCache::with_ttl(Duration::seconds(config.cache_ttl_secs)),
            sweep: SweepSchedule::new(Duration::seconds(config.sweep_interval_secs), Utc::now()),
            capture_sink,
            captures,
            downloads: DownloadTracker::new(config.download_dir.clone()),
            suggestions: SuggestionRanker::new(),
            tracking_protection,
            input_resolver: InputResolver::with_search_engine(config.search_engine.clone()),
            config,
            db,
        }
    }

    /// Apply stored preferences and restore the last session
    pub fn start(&mut self) -> Result<()> {
        if let Some(template) = self.db.get_setting(SETTING_SEARCH_ENGINE)? {
            self.input_resolver.set_search_engine(template);
        }

        match self.db.get_setting(SETTING_HOMEPAGE)? {
            Some(homepage) if homepage.trim().is_empty() => {
                tracing::warn!("Ignoring blank stored homepage");
            }
            Some(homepage) => self.session.set_homepage(homepage),
            None => {}
        }

        if let Some(domains) = self
            .db
            .get_json_setting::<Vec<String>>(SETTING_BLOCKED_DOMAINS)?
        {
            self.tracking_protection.set_blocked_domains(domains);
        }

        let snapshot = SessionManager::load(&self.state_file);
        self.session.restore(snapshot, &mut self.history)?;
        self.suggestions.refresh(&self.history);

        tracing::info!(
            tabs = self.session.tabs().len(),
            history = self.history.len(),
            "Browser started"
        );

        Ok(())
    }

    /// Persist the session to the state file
    pub fn shutdown(&mut self) -> Result<()> {
        self.session.save(&self.state_file, &self.history)?;
        self.history.mark_clean();

        tracing::info!("Browser shut down");
        Ok(())
    }

    // === Navigation ===

    /// Resolve address bar input and load it in the tab at `index`.
    /// Returns the URL loaded.
    pub fn navigate(&mut self, index: usize, input: &str) -> Result<String> {
        let resolution = self.input_resolver.resolve(input);
        let url = resolution.into_url();

        if let Some(domain) = self.tracking_protection.matching_domain(&url) {
            tracing::warn!(url = %url, domain = %domain, "Blocked navigation");
            return Err(CoreError::Blocked {
                url,
                domain: domain.to_string(),
            });
        }

        let tab = self.tab_at_mut(index)?;
        tab.navigate(url.clone())?;

        tracing::info!(tab_id = %tab.id, url = %url, "Navigating");
        Ok(url)
    }

    /// Navigate the focused tab
    pub fn navigate_active(&mut self, input: &str) -> Result<String> {
        let index = self.session.tabs().active_index().ok_or(TabError::IndexOutOfRange {
            index: 0,
            len: 0,
        })?;
        self.navigate(index, input)
    }

    pub fn resolve_input(&self, input: &str) -> stratus_navigation::InputResolution {
        self.input_resolver.resolve(input)
    }

    /// Ranked address bar suggestions containing `prefix`
    pub fn suggest(&self, prefix: &str, limit: usize) -> Vec<String> {
        self.suggestions.suggest(prefix, limit)
    }

    // === Engine events ===

    pub fn on_url_changed(&mut self, tab_id: &str, url: String) -> Result<()> {
        self.tabs_mut().by_id_mut(tab_id)?.set_url(url);
        Ok(())
    }

    pub fn on_load_started(&mut self, tab_id: &str) -> Result<()> {
        self.tabs_mut().by_id_mut(tab_id)?.begin_loading()?;
        Ok(())
    }

    /// Settle a page load. A successful load is recorded in history and its
    /// text requested for the page cache.
    pub fn on_load_finished(&mut self, tab_id: &str, success: bool) -> Result<()> {
        let tab = self.session.tabs_mut().by_id_mut(tab_id)?;
        tab.finish_loading(success)?;

        if !success {
            return Ok(());
        }

        let url = tab.url.clone();
        let title = tab.page_title();

        if self.history.record(&url, &title) {
            self.suggestions.refresh(&self.history);
        }

        let capture = self.capture_sink.request(&url);
        tab.request_page_text(capture);

        tracing::debug!(tab_id = %tab_id, url = %url, "Page loaded");
        Ok(())
    }

    pub fn on_title_changed(&mut self, tab_id: &str, title: String) -> Result<()> {
        self.tabs_mut().by_id_mut(tab_id)?.set_title(title);
        Ok(())
    }

    pub fn on_icon_changed(&mut self, tab_id: &str, icon: Option<String>) -> Result<()> {
        self.tabs_mut().by_id_mut(tab_id)?.set_icon(icon);
        Ok(())
    }

    // === Tab operations ===

    pub fn open_tab(&mut self, url: Option<String>) -> Result<usize> {
        Ok(self.session.open_tab(url)?)
    }

    pub fn close_tab(&mut self, index: usize) -> bool {
        self.session.close_tab(index)
    }

    pub fn focus(&mut self, index: usize) -> Result<()> {
        Ok(self.session.focus(index)?)
    }

    pub fn focus_next(&mut self) -> Option<usize> {
        self.session.focus_next()
    }

    pub fn focus_prev(&mut self) -> Option<usize> {
        self.session.focus_prev()
    }

    pub fn move_tab(&mut self, from: usize, to: usize) -> Result<()> {
        Ok(self.session.move_tab(from, to)?)
    }

    pub fn back(&mut self) {
        if let Some(tab) = self.tabs_mut().active_mut() {
            tab.back();
        }
    }

    pub fn forward(&mut self) {
        if let Some(tab) = self.tabs_mut().active_mut() {
            tab.forward();
        }
    }

    pub fn reload(&mut self) {
        if let Some(tab) = self.tabs_mut().active_mut() {
            tab.reload();
        }
    }

    /// Open the history listing in a new tab
    pub fn open_history_tab(&mut self) -> usize {
        let html = render_history_page(&self.history.list_recent(), &Local::now());
        self.session
            .open_static_tab(HISTORY_PAGE_TITLE.to_string(), html)
    }

    pub fn tabs(&self) -> &TabManager {
        self.session.tabs()
    }

    fn tabs_mut(&mut self) -> &mut TabManager {
        self.session.tabs_mut()
    }

    fn tab_at_mut(&mut self, index: usize) -> Result<&mut Tab> {
        let len = self.session.tabs().len();
        self.tabs_mut()
            .get_mut(index)
            .ok_or(CoreError::Tab(TabError::IndexOutOfRange { index, len }))
    }

    // === Page cache ===

    /// Apply page captures the engine has delivered. Returns how many.
    pub fn pump_captures(&mut self, now: DateTime<Utc>) -> usize {
        let captures = self.captures.drain();
        let count = captures.len();

        for capture in captures {
            self.cache.put_at(&capture.url, capture.content, now);
        }

        if count > 0 {
            tracing::debug!(count, cached = self.cache.len(), "Cached page captures");
        }
        count
    }

    /// Run the cache sweep if it is due. Returns the number of entries evicted.
    pub fn tick(&mut self, now: DateTime<Utc>) -> usize {
        if !self.sweep.due(now) {
            return 0;
        }
        self.cache.sweep(now)
    }

    pub fn cached_page(&self, url: &str, now: DateTime<Utc>) -> Option<&str> {
        self.cache.get(url, now)
    }

    // === Downloads ===

    pub fn on_download_requested(&mut self, request: &mut dyn DownloadRequest) -> Option<DownloadId> {
        self.downloads.accept(request)
    }

    pub fn on_download_progress(&mut self, id: &str, received: u64, total: Option<u64>) -> Result<()> {
        Ok(self.downloads.on_progress(id, received, total)?)
    }

    pub fn on_download_state_changed(&mut self, id: &str, code: i32) -> Result<()> {
        Ok(self.downloads.on_state_changed(id, code)?)
    }

    pub fn on_download_finished(&mut self, id: &str) -> Result<()> {
        Ok(self.downloads.on_finished(id)?)
    }

    pub fn clear_completed_downloads(&mut self) -> usize {
        self.downloads.clear_completed()
    }

    pub fn downloads(&self) -> &DownloadTracker {
        &self.downloads
    }

    // === Settings ===

    pub fn search_engine(&self) -> &str {
        self.input_resolver.search_template()
    }

    pub fn set_search_engine(&mut self, template: String) -> Result<()> {
        self.db.set_setting(SETTING_SEARCH_ENGINE, &template)?;
        self.input_resolver.set_search_engine(template);
        Ok(())
    }

    pub fn homepage(&self) -> &str {
        self.session.homepage()
    }

    pub fn set_homepage(&mut self, homepage: String) -> Result<()> {
        if homepage.trim().is_empty() {
            return Err(CoreError::Tab(TabError::InvalidUrl(
                "Homepage cannot be empty".to_string(),
            )));
        }

        self.db.set_setting(SETTING_HOMEPAGE, &homepage)?;
        self.session.set_homepage(homepage);
        Ok(())
    }

    pub fn set_blocked_domains(&mut self, domains: Vec<String>) -> Result<usize> {
        self.db.set_json_setting(SETTING_BLOCKED_DOMAINS, &domains)?;
        self.tracking_protection.set_blocked_domains(domains);
        Ok(self.tracking_protection.blocked_domain_count())
    }

    pub fn should_block_url(&self, url: &str) -> bool {
        self.tracking_protection.should_block(url)
    }

    // === Accessors ===

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

//! Stratus Core
//!
//! Central coordination layer for the Stratus browser. The `Browser` owns the
//! tab session, history, page cache, downloads and preferences; the rendering
//! engine plugs in through `EngineFactory` and reports back through events.

mod browser;
mod config;
mod error;
mod history_page;

pub use browser::Browser;
pub use config::{Config, MAX_PERIOD_SECS};
pub use error::CoreError;
pub use history_page::{render_history_page, HISTORY_PAGE_TITLE};

// Re-export core components
pub use stratus_cache::{PageCache, PendingCapture, SweepSchedule};
pub use stratus_download::{
    DownloadError, DownloadId, DownloadRecord, DownloadRequest, DownloadStatus, DownloadTracker,
};
pub use stratus_navigation::{
    display_label, DayGroup, FrequencyIndex, HistoryStore, InputResolution, InputResolver,
    NavigationError, SuggestionRanker, VisitRecord,
};
pub use stratus_privacy::TrackingProtection;
pub use stratus_session::{SessionError, SessionManager, SessionSnapshot, SnapshotTab};
pub use stratus_storage::{Database, StateFile, StorageError};
pub use stratus_tabs::{EngineFactory, PageView, Tab, TabError, TabId, TabManager, TabState};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}

//! Browser configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use stratus_cache::{DEFAULT_SWEEP_INTERVAL_SECS, DEFAULT_TTL_SECS};
use stratus_navigation::DEFAULT_SEARCH_ENGINE;
use stratus_session::DEFAULT_HOMEPAGE;

use crate::error::CoreError;
use crate::Result;

/// Longest accepted cache lifetime or sweep interval (one year)
pub const MAX_PERIOD_SECS: i64 = 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the session state file
    pub state_file_path: PathBuf,
    /// Path to the preference database
    pub database_path: PathBuf,
    /// Default download directory
    pub download_dir: PathBuf,
    /// Search engine URL template, `%s` marks the query
    pub search_engine: String,
    /// Homepage URL
    pub homepage: String,
    /// Page cache entry lifetime
    pub cache_ttl_secs: i64,
    /// How often expired cache entries are swept
    pub sweep_interval_secs: i64,
    /// Enable tracking protection
    pub tracking_protection: bool,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        let download_dir = dirs::download_dir().unwrap_or_else(|| data_dir.join("Downloads"));

        Self {
            state_file_path: data_dir.join("session.json"),
            database_path: data_dir.join("stratus.db"),
            download_dir,
            search_engine: DEFAULT_SEARCH_ENGINE.to_string(),
            homepage: DEFAULT_HOMEPAGE.to_string(),
            cache_ttl_secs: DEFAULT_TTL_SECS,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
            tracking_protection: true,
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Stratus"))
            .unwrap_or_else(|| PathBuf::from(".stratus"))
    }

    pub fn validate(&self) -> Result<()> {
        check_period("cache_ttl_secs", self.cache_ttl_secs)?;
        check_period("sweep_interval_secs", self.sweep_interval_secs)?;
        if !self.search_engine.contains("%s") {
            return Err(CoreError::Config(format!(
                "search engine template has no %s placeholder: {}",
                self.search_engine
            )));
        }
        Ok(())
    }
}

fn check_period(name: &str, secs: i64) -> Result<()> {
    if !(1..=MAX_PERIOD_SECS).contains(&secs) {
        return Err(CoreError::Config(format!(
            "{} must be between 1 and {}, got {}",
            name, MAX_PERIOD_SECS, secs
        )));
    }
    Ok(())
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Simple dirs implementation for common directories
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }

    pub fn download_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|h| PathBuf::from(h).join("Downloads"))
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Downloads"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DOWNLOAD_DIR")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join("Downloads"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}

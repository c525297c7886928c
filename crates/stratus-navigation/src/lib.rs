//! Stratus Navigation
//!
//! - Address bar resolution: direct URL, inferred scheme, or search
//! - Human-readable labels for visited pages
//! - Append-only history log with a word-frequency index
//! - Autocomplete suggestions ranked by word frequency

mod error;
mod history;
mod input;
mod label;
mod suggest;

pub use error::NavigationError;
pub use history::{group_by_day, tokenize, DayGroup, FrequencyIndex, HistoryStore, VisitRecord};
pub use input::{InputResolution, InputResolver, DEFAULT_SEARCH_ENGINE};
pub use label::display_label;
pub use suggest::SuggestionRanker;

pub type Result<T> = std::result::Result<T, NavigationError>;

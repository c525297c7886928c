//! Stratus Page Cache
//!
//! Captured page text keyed by URL, kept for a bounded lifetime:
//! - last write wins per URL
//! - entries older than the TTL are dropped by a periodic sweep
//! - nothing is persisted across restarts
//!
//! Page text arrives asynchronously from the rendering engine through a
//! capture channel and is applied on the control thread.

mod capture;
mod page_cache;
mod sweep;

pub use capture::{capture_channel, CaptureReceiver, CaptureSink, PageCapture, PendingCapture};
pub use page_cache::{PageCache, DEFAULT_TTL_SECS};
pub use sweep::{SweepSchedule, DEFAULT_SWEEP_INTERVAL_SECS};

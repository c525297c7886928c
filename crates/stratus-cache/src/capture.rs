//! Asynchronous page-text capture
//!
//! The rendering engine serializes a page's text some time after it is asked
//! to. Each request carries a `PendingCapture` bound to the URL that was
//! current when the request was made; delivering it sends the text back over
//! an unbounded channel that the control thread drains.

use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};

/// Page text captured for a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCapture {
    pub url: String,
    pub content: String,
}

pub fn capture_channel() -> (CaptureSink, CaptureReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (CaptureSink { tx }, CaptureReceiver { rx })
}

#[derive(Debug, Clone)]
pub struct CaptureSink {
    tx: UnboundedSender<PageCapture>,
}

impl CaptureSink {
    /// Start a capture for `url`
    pub fn request(&self, url: &str) -> PendingCapture {
        PendingCapture {
            url: url.to_string(),
            tx: self.tx.clone(),
        }
    }
}

/// A capture the engine has yet to complete
#[derive(Debug)]
pub struct PendingCapture {
    url: String,
    tx: UnboundedSender<PageCapture>,
}

impl PendingCapture {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Hand the captured text back. Returns `false` when the receiving side
    /// is gone (the browser is shutting down); the text is then discarded.
    pub fn deliver(self, content: String) -> bool {
        let url = self.url;
        match self.tx.send(PageCapture { url, content }) {
            Ok(()) => true,
            Err(_) => {
                tracing::debug!("Capture delivered after receiver closed");
                false
            }
        }
    }
}

#[derive(Debug)]
pub struct CaptureReceiver {
    rx: UnboundedReceiver<PageCapture>,
}

impl CaptureReceiver {
    /// Take every capture delivered so far without blocking
    pub fn drain(&mut self) -> Vec<PageCapture> {
        let mut captures = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(capture) => captures.push(capture),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        captures
    }
}

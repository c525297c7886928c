//! Engine double for tab tests

use std::cell::RefCell;
use std::rc::Rc;

use stratus_cache::PendingCapture;

use crate::content::{EngineFactory, PageView};

#[derive(Debug, Default)]
pub struct ViewLog {
    pub loads: Vec<String>,
    pub commands: Vec<&'static str>,
    pub html: Option<String>,
    pub title: String,
    pub captures: Vec<PendingCapture>,
}

pub struct RecordingView {
    log: Rc<RefCell<ViewLog>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self {
            log: Rc::new(RefCell::new(ViewLog::default())),
        }
    }

    pub fn log(&self) -> Rc<RefCell<ViewLog>> {
        Rc::clone(&self.log)
    }
}

impl PageView for RecordingView {
    fn load(&mut self, url: &str) {
        self.log.borrow_mut().loads.push(url.to_string());
    }

    fn back(&mut self) {
        self.log.borrow_mut().commands.push("back");
    }

    fn forward(&mut self) {
        self.log.borrow_mut().commands.push("forward");
    }

    fn reload(&mut self) {
        self.log.borrow_mut().commands.push("reload");
    }

    fn current_url(&self) -> String {
        self.log.borrow().loads.last().cloned().unwrap_or_default()
    }

    fn page_title(&self) -> String {
        self.log.borrow().title.clone()
    }

    fn request_page_text(&mut self, capture: PendingCapture) {
        self.log.borrow_mut().captures.push(capture);
    }

    fn show_html(&mut self, html: &str) {
        self.log.borrow_mut().html = Some(html.to_string());
    }
}

#[derive(Default)]
pub struct RecordingFactory {
    pub created: usize,
}

impl EngineFactory for RecordingFactory {
    fn create_view(&mut self) -> Box<dyn PageView> {
        self.created += 1;
        Box::new(RecordingView::new())
    }
}

//! Report viewer core.
//!
//! Loads a markdown report, renders it to display lines and tracks the
//! scroll position. Terminal drawing and key handling live in `tui`; this
//! module is pure state so it can be driven without a terminal.
//!
//! Phases: `Loading → Ready → Closed`, with scrolling as a self-loop on
//! `Ready`. A failed load ends in `Error`.

mod markdown;
mod scroll;

pub use markdown::render_markdown;
pub use scroll::ScrollState;

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};
use ratatui::text::Line;

use crate::error::{Result, TaskflowError};
use crate::report::Report;

/// A loaded report together with its rendered lines.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub path: PathBuf,
    pub report: Report,
    pub lines: Vec<Line<'static>>,
}

/// Read, validate and render a report file.
///
/// Fails with [`TaskflowError::ReportIo`] when the file cannot be read and
/// [`TaskflowError::Parse`] when it is not a taskflow report (including
/// files that are not UTF-8 text).
pub fn load(path: &Path) -> Result<ReportDocument> {
    let markdown = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::InvalidData => TaskflowError::Parse(format!("{} is not UTF-8 text", path.display())),
        _ => TaskflowError::report_io(path, e),
    })?;
    let report = Report::parse(&markdown)?;
    let lines = render_markdown(&markdown);
    debug!("Loaded {} ({} entries, {} lines)", path.display(), report.entries.len(), lines.len());
    Ok(ReportDocument {
        path: path.to_path_buf(),
        report,
        lines,
    })
}

/// Lifecycle of the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerPhase {
    Loading,
    Ready,
    Closed,
    Error(String),
}

/// User requests the viewer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerAction {
    LineUp,
    LineDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    Quit,
}

/// Viewer state: the document, its scroll position and the current phase.
#[derive(Debug)]
pub struct Viewer {
    path: PathBuf,
    phase: ViewerPhase,
    document: Option<ReportDocument>,
    scroll: ScrollState,
}

impl Viewer {
    /// Create a viewer for `path`; nothing is read until [`Viewer::load`]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            phase: ViewerPhase::Loading,
            document: None,
            scroll: ScrollState::new(0, 0),
        }
    }

    /// Load the report, moving to `Ready` or `Error`
    pub fn load(&mut self) -> Result<()> {
        match load(&self.path) {
            Ok(document) => {
                self.scroll = ScrollState::new(document.lines.len(), self.scroll.viewport_height());
                self.document = Some(document);
                self.phase = ViewerPhase::Ready;
                info!("Viewer ready: {}", self.path.display());
                Ok(())
            }
            Err(e) => {
                self.phase = ViewerPhase::Error(e.to_string());
                Err(e)
            }
        }
    }

    /// Build a ready viewer from an already loaded document
    pub fn from_document(document: ReportDocument) -> Self {
        Self {
            path: document.path.clone(),
            phase: ViewerPhase::Ready,
            scroll: ScrollState::new(document.lines.len(), 0),
            document: Some(document),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn phase(&self) -> &ViewerPhase {
        &self.phase
    }

    pub fn document(&self) -> Option<&ReportDocument> {
        self.document.as_ref()
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn is_closed(&self) -> bool {
        self.phase == ViewerPhase::Closed
    }

    /// Resize the viewport, keeping the offset in range
    pub fn set_viewport_height(&mut self, height: usize) {
        self.scroll.set_viewport_height(height);
    }

    /// Apply a user action. Ignored unless the viewer is `Ready`.
    pub fn apply(&mut self, action: ViewerAction) {
        if self.phase != ViewerPhase::Ready {
            return;
        }
        match action {
            ViewerAction::LineUp => self.scroll.line_up(),
            ViewerAction::LineDown => self.scroll.line_down(),
            ViewerAction::PageUp => self.scroll.page_up(),
            ViewerAction::PageDown => self.scroll.page_down(),
            ViewerAction::Top => self.scroll.top(),
            ViewerAction::Bottom => self.scroll.bottom(),
            ViewerAction::Quit => {
                debug!("Viewer closed at offset {}", self.scroll.offset());
                self.phase = ViewerPhase::Closed;
            }
        }
    }

    /// Lines inside the viewport at the current offset
    pub fn visible_lines(&self) -> &[Line<'static>] {
        match &self.document {
            Some(doc) => &doc.lines[self.scroll.visible_range()],
            None => &[],
        }
    }
}

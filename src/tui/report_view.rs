//! Report viewer runner - main event loop for `taskflow view`.
//!
//! The `ViewerRunner` owns the terminal, the viewer and the event handler.
//! It runs the main loop: render → handle events → repeat until closed.

use log::info;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::Tui;
use super::colors;
use super::events::{Event, EventHandler};
use super::input::viewer_action;
use crate::error::Result;
use crate::viewer::Viewer;

/// Rows of the body that hold content: the frame minus borders and footer
pub fn content_height(area: Rect) -> usize {
    area.height.saturating_sub(3) as usize
}

/// Draw the viewer: bordered document body plus a one-line footer
pub fn render_viewer(frame: &mut Frame, viewer: &Viewer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(frame.area());

    let title = viewer
        .path()
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| viewer.path().display().to_string());
    let body = Paragraph::new(viewer.visible_lines().to_vec()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors::HEADER))
            .title(Span::styled(
                format!(" {} ", title),
                Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
            )),
    );
    frame.render_widget(body, chunks[0]);

    let scroll = viewer.scroll();
    let range = scroll.visible_range();
    let position = if range.is_empty() {
        format!("Lines 0 of {}", scroll.total_lines())
    } else {
        format!("Lines {}-{} of {}", range.start + 1, range.end, scroll.total_lines())
    };
    let footer = Line::from(vec![
        Span::styled(position, Style::default().fg(colors::DIM)),
        Span::styled(" │ ", Style::default().fg(colors::DIM)),
        Span::styled("↑↓/jk", Style::default().fg(colors::KEYBIND)),
        Span::raw(" scroll  "),
        Span::styled("PgUp/PgDn", Style::default().fg(colors::KEYBIND)),
        Span::raw(" page  "),
        Span::styled("g/G", Style::default().fg(colors::KEYBIND)),
        Span::raw(" top/bottom"),
        Span::styled(" │ ", Style::default().fg(colors::DIM)),
        Span::styled("q", Style::default().fg(colors::KEYBIND)),
        Span::raw(" quit"),
    ]);
    frame.render_widget(Paragraph::new(footer), chunks[1]);
}

/// Full-screen report viewer that owns the event loop.
pub struct ViewerRunner {
    terminal: Tui,
    viewer: Viewer,
    event_handler: EventHandler,
}

impl ViewerRunner {
    pub fn new(terminal: Tui, viewer: Viewer, tick_rate_ms: u64) -> Self {
        Self {
            terminal,
            viewer,
            event_handler: EventHandler::new(tick_rate_ms),
        }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Run until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        info!("Starting viewer loop for {}", self.viewer.path().display());

        while !self.viewer.is_closed() {
            let area = self.terminal.get_frame().area();
            self.viewer.set_viewport_height(content_height(area));
            self.terminal.draw(|f| render_viewer(f, &self.viewer))?;

            match self.event_handler.next().await? {
                Event::Key(key) => {
                    if let Some(action) = viewer_action(&key) {
                        self.viewer.apply(action);
                    }
                }
                Event::Tick | Event::Resize(_, _) => {}
            }
        }

        info!("Viewer loop ended");
        Ok(())
    }
}

//! Live run dashboard.
//!
//! Draws the two progress gauges and the recent activity in an inline
//! viewport below the shell prompt, so the final state stays in scrollback.

use std::collections::VecDeque;
use std::io::{Stdout, stdout};

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{
    Frame, Terminal, TerminalOptions, Viewport,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem},
};

use super::colors;
use crate::domain::{LogEntry, LogLevel};
use crate::error::Result;
use crate::progress::{IndicatorView, ProgressSnapshot};
use crate::runner::RunDisplay;

/// Rows used by everything except the activity lines
const CHROME_HEIGHT: u16 = 2 + 3 + 3 + 2;

/// Viewport height needed to show `activity_lines` entries
pub fn dashboard_height(activity_lines: usize) -> u16 {
    CHROME_HEIGHT + activity_lines.max(1) as u16
}

fn gauge<'a>(title: &'a str, view: &IndicatorView, color: ratatui::style::Color) -> Gauge<'a> {
    let status = if view.total > 0 && view.is_complete() {
        "Complete!".to_string()
    } else {
        view.count_label()
    };
    Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", title)))
        .gauge_style(Style::default().fg(color).bg(colors::DIM))
        .ratio(view.ratio())
        .label(format!(
            "{:>5.1}% • {} • {}",
            view.ratio() * 100.0,
            view.elapsed_label(),
            status
        ))
}

fn activity_item(entry: &LogEntry) -> ListItem<'static> {
    let (tag, color) = match entry.level {
        LogLevel::Info => (entry.level.tag(), colors::INFO),
        LogLevel::Warn => (entry.level.tag(), colors::WARN),
    };
    ListItem::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(colors::DIM)),
        Span::styled(format!("{} ", tag), Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::raw(entry.message.clone()),
    ]))
}

/// Render the dashboard into the frame
pub fn render_dashboard(frame: &mut Frame, snapshot: &ProgressSnapshot, activity: &VecDeque<LogEntry>) {
    let outer_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER))
        .title(Span::styled(
            " TaskFlow Execution ",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        ));
    let area = outer_block.inner(frame.area());
    frame.render_widget(outer_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    frame.render_widget(gauge("Outer Loop", &snapshot.outer, colors::OUTER), chunks[0]);
    frame.render_widget(gauge("Inner Loop", &snapshot.inner, colors::INNER), chunks[1]);

    let items: Vec<ListItem> = if activity.is_empty() {
        vec![ListItem::new(Span::styled("Waiting for tasks...", Style::default().fg(colors::DIM)))]
    } else {
        activity.iter().map(activity_item).collect()
    };
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(" Activity Log "));
    frame.render_widget(list, chunks[2]);
}

/// Inline terminal dashboard for interactive runs.
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    closed: bool,
}

impl Dashboard {
    /// Take over the terminal: raw mode plus an inline viewport of `height` rows
    pub fn new(height: u16) -> Result<Self> {
        enable_raw_mode()?;
        let terminal = Terminal::with_options(
            CrosstermBackend::new(stdout()),
            TerminalOptions {
                viewport: Viewport::Inline(height),
            },
        );
        match terminal {
            Ok(terminal) => Ok(Self { terminal, closed: false }),
            Err(e) => {
                let _ = disable_raw_mode();
                Err(e.into())
            }
        }
    }
}

impl RunDisplay for Dashboard {
    fn draw(&mut self, snapshot: &ProgressSnapshot, activity: &VecDeque<LogEntry>) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.terminal.draw(|f| render_dashboard(f, snapshot, activity))?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        disable_raw_mode()?;
        self.terminal.show_cursor()?;
        println!();
        Ok(())
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        if !self.closed {
            let _ = disable_raw_mode();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressTracker;
    use ratatui::backend::TestBackend;

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let symbols: Vec<&str> = buffer.content().iter().map(|c| c.symbol()).collect();
        symbols.chunks(width).map(|row| row.concat()).collect::<Vec<_>>().join("\n")
    }

    #[test]
    fn test_dashboard_height() {
        assert_eq!(dashboard_height(10), 20);
        assert_eq!(dashboard_height(0), 11);
    }

    #[test]
    fn test_render_dashboard_shows_both_gauges() {
        let mut tracker = ProgressTracker::new(4);
        tracker.reset_inner(10);
        tracker.advance_inner();
        tracker.advance_outer();

        let mut activity = VecDeque::new();
        activity.push_back(LogEntry::info("Middle iteration 1/3 (outer=1)"));
        activity.push_back(LogEntry::warn("Short-circuit before inner iteration 2/10"));

        let mut terminal = Terminal::new(TestBackend::new(100, dashboard_height(4))).unwrap();
        terminal
            .draw(|f| render_dashboard(f, &tracker.render(), &activity))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("TaskFlow Execution"));
        assert!(text.contains("Outer Loop"));
        assert!(text.contains("Inner Loop"));
        assert!(text.contains("1/4"));
        assert!(text.contains("1/10"));
        assert!(text.contains("Middle iteration 1/3 (outer=1)"));
        assert!(text.contains("WARN"));
    }

    #[test]
    fn test_render_dashboard_waiting() {
        let tracker = ProgressTracker::new(2);
        let mut terminal = Terminal::new(TestBackend::new(80, dashboard_height(3))).unwrap();
        terminal
            .draw(|f| render_dashboard(f, &tracker.render(), &VecDeque::new()))
            .unwrap();
        assert!(buffer_text(&terminal).contains("Waiting for tasks..."));
    }

    #[test]
    fn test_render_dashboard_complete_label() {
        let mut tracker = ProgressTracker::new(1);
        tracker.advance_outer();
        let mut terminal = Terminal::new(TestBackend::new(80, dashboard_height(1))).unwrap();
        terminal
            .draw(|f| render_dashboard(f, &tracker.render(), &VecDeque::new()))
            .unwrap();
        assert!(buffer_text(&terminal).contains("Complete!"));
    }
}

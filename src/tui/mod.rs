//! Terminal User Interface for TaskFlow.
//!
//! Two surfaces share the crossterm/ratatui stack:
//! - **Dashboard**: inline progress gauges and activity while a run executes
//! - **Report viewer**: full-screen scrollable view of a written report
//!
//! Both run inside the tokio runtime; terminal polling happens on the
//! blocking pool.

mod dashboard;
mod events;
mod input;
mod report_view;

pub use dashboard::{Dashboard, dashboard_height, render_dashboard};
pub use events::{Event, EventHandler};
pub use input::{is_ctrl_c, is_interrupt, viewer_action};
pub use report_view::{ViewerRunner, content_height, render_viewer};

use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    tty::IsTty,
};
use ratatui::prelude::*;
use std::io::{Stdout, stdout};

use crate::error::Result;

/// Type alias for our terminal backend.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Whether stdout is an interactive terminal
pub fn stdout_is_tty() -> bool {
    stdout().is_tty()
}

/// Initialize the terminal for the full-screen viewer.
///
/// Enables raw mode and switches to the alternate screen.
pub fn init_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
///
/// Disables raw mode and leaves the alternate screen.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Palette shared by the dashboard and the viewer.
pub mod colors {
    use ratatui::style::Color;

    pub const OUTER: Color = Color::Rgb(0, 191, 255); // Deep sky blue
    pub const INNER: Color = Color::Rgb(0, 255, 127); // Spring green
    pub const INFO: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const WARN: Color = Color::Rgb(255, 215, 0); // Gold
    pub const HEADER: Color = Color::Magenta;
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const DIM: Color = Color::DarkGray;
}

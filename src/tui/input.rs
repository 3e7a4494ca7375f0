//! Input handling for TUI
//!
//! Maps raw key events to viewer actions and interrupt requests.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::viewer::ViewerAction;

/// Check if this is Ctrl+C
pub fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Keys that abort a running simulation (Ctrl+C, q, Esc)
pub fn is_interrupt(key: &KeyEvent) -> bool {
    is_ctrl_c(key) || matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
}

/// Map a key to the viewer action it triggers, if any
pub fn viewer_action(key: &KeyEvent) -> Option<ViewerAction> {
    if is_ctrl_c(key) {
        return Some(ViewerAction::Quit);
    }
    let action = match key.code {
        KeyCode::Up | KeyCode::Char('k') => ViewerAction::LineUp,
        KeyCode::Down | KeyCode::Char('j') => ViewerAction::LineDown,
        KeyCode::PageUp | KeyCode::Char('b') => ViewerAction::PageUp,
        KeyCode::PageDown | KeyCode::Char(' ') | KeyCode::Char('f') => ViewerAction::PageDown,
        KeyCode::Home | KeyCode::Char('g') => ViewerAction::Top,
        KeyCode::End | KeyCode::Char('G') => ViewerAction::Bottom,
        KeyCode::Char('q') | KeyCode::Esc => ViewerAction::Quit,
        _ => return None,
    };
    Some(action)
}

//! Event handling for the TUI.
//!
//! This module provides:
//! - `Event`: The unified event type (keyboard, tick, resize)
//! - `EventHandler`: Async event source polling the terminal with a tick interval

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::Duration;

use super::input::is_interrupt;
use crate::error::Result;

/// Unified event type for the TUI.
#[derive(Debug, Clone)]
pub enum Event {
    /// Keyboard input event
    Key(KeyEvent),
    /// Poll timeout without input
    Tick,
    /// Terminal resize
    Resize(u16, u16),
}

/// Handles keyboard and tick events.
///
/// Polls for crossterm events with a tick interval so callers wake up regularly.
pub struct EventHandler {
    /// Tick rate in milliseconds
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler with the given tick rate.
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Get the next event.
    ///
    /// A tick is generated when the poll timeout expires without an event.
    pub async fn next(&self) -> Result<Event> {
        // Poll on the blocking pool so the runtime keeps driving other work
        let tick_rate = self.tick_rate;

        let event = tokio::task::spawn_blocking(move || -> Result<Event> {
            if event::poll(tick_rate)? {
                match event::read()? {
                    CrosstermEvent::Key(key) => {
                        // Only handle key press events, not release
                        if key.kind == KeyEventKind::Press {
                            Ok(Event::Key(key))
                        } else {
                            Ok(Event::Tick)
                        }
                    }
                    CrosstermEvent::Resize(w, h) => Ok(Event::Resize(w, h)),
                    _ => Ok(Event::Tick),
                }
            } else {
                Ok(Event::Tick)
            }
        })
        .await
        .map_err(std::io::Error::other)??;

        Ok(event)
    }

    /// Resolve once the user presses an interrupt key (Ctrl+C, q or Esc).
    ///
    /// Terminal errors end the wait as well, so a broken terminal stops the run.
    pub async fn wait_for_interrupt(&self) {
        loop {
            match self.next().await {
                Ok(Event::Key(key)) if is_interrupt(&key) => return,
                Ok(_) => {}
                Err(e) => {
                    log::warn!("Terminal event polling failed: {}", e);
                    return;
                }
            }
        }
    }

    /// Let abandoned polls finish, then discard any queued input.
    ///
    /// A dropped `next()` future leaves its blocking poll running for up to one
    /// tick, and that poll consumes the event it sees. Call this before handing
    /// the terminal to a new event loop so its first key press is not lost.
    pub async fn settle(&self) -> Result<usize> {
        tokio::time::sleep(self.tick_rate).await;
        let discarded = drain_pending(|| event::poll(Duration::ZERO), || event::read().map(|_| ()))?;
        Ok(discarded)
    }
}

/// Read events while `poll` reports one is ready; returns how many were dropped
fn drain_pending<P, R>(mut poll: P, mut read: R) -> Result<usize>
where
    P: FnMut() -> std::io::Result<bool>,
    R: FnMut() -> std::io::Result<()>,
{
    let mut discarded = 0;
    while poll()? {
        read()?;
        discarded += 1;
    }
    Ok(discarded)
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(100)
    }
}

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEvent};
use prompter_core::TickClock;

/// Event handler for terminal events and animation ticks
///
/// Ticks are due every `tick_rate` measured from the previous tick, so a
/// stream of key presses or mouse motion cannot starve the animation.
pub struct EventHandler {
    tick_rate: Duration,
    clock: TickClock,
}

impl EventHandler {
    pub fn new(tick_rate: Duration, max_tick_delta: Duration) -> Self {
        Self {
            tick_rate,
            clock: TickClock::new(max_tick_delta),
        }
    }

    /// Poll for the next event
    pub fn next(&mut self) -> Result<Option<AppEvent>> {
        let timeout = self.clock.until_next(Instant::now(), self.tick_rate);
        if timeout.is_zero() || !event::poll(timeout)? {
            return Ok(Some(AppEvent::Tick(self.clock.tick())));
        }

        match event::read()? {
            Event::Key(key) => {
                // Only handle key press events, ignore release events
                // (crossterm 0.27+ sends release events on some systems)
                if key.kind == KeyEventKind::Press {
                    Ok(Some(AppEvent::Key(key)))
                } else {
                    Ok(None)
                }
            }
            Event::Mouse(mouse) => Ok(Some(AppEvent::Mouse(mouse))),
            Event::Resize(w, h) => Ok(Some(AppEvent::Resize(w, h))),
            Event::FocusLost => Ok(Some(AppEvent::FocusLost)),
            _ => Ok(None),
        }
    }
}

/// Application events
#[derive(Debug)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Pointer moved, clicked or scrolled
    Mouse(MouseEvent),
    /// Terminal was resized
    Resize(u16, u16),
    /// Terminal lost focus; the pointer is no longer over the prompter
    FocusLost,
    /// Animation tick carrying the time since the previous one
    Tick(Duration),
}

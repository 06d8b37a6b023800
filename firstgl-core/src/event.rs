//! Platform-independent input events and the traits the frame loop polls and presents through.

use std::time::{Duration, Instant};

use serde::Deserialize;

/// The few keys the demos care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Key {
    End,
    Escape,
    Q,
    /// Any key not listed above. Never accepted as a configured quit key.
    #[serde(skip_deserializing)]
    Other,
}

/// An input event, already translated from the windowing library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The window was closed or the application was asked to terminate.
    Quit,
    KeyDown(Key),
    Resized { width: u32, height: u32 },
    Other,
}

/// Source of pending input events.
pub trait EventSource {
    /// Drains every event that is pending right now, without blocking.
    fn poll_events(&mut self) -> Vec<Event>;
}

/// Something a finished frame can be presented on.
pub trait Surface {
    /// Swaps the back buffer to the screen.
    fn present(&mut self);
}

/// Time since the demo started.
pub trait Clock {
    fn elapsed(&self) -> Duration;
}

/// A [`Clock`] backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct StartClock {
    start: Instant,
}

impl StartClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for StartClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

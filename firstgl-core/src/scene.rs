//! The [`Scene`] trait: what the frame loop drives once per iteration.

use std::time::Duration;

use crate::event::Event;

/// The common interface of everything the frame loop can run.
pub trait Scene {
    /// Handles an event that did not end the loop.
    fn handle_event(&mut self, _event: &Event) {}

    /// Updates the scene for the given time since start-up.
    fn update(&mut self, elapsed: Duration);

    /// Renders the scene into the back buffer.
    fn render(&mut self);
}

//! The frame loop: pump events, update, render, present, until told to quit.

use crate::{
    event::{Clock, Event, EventSource, Key, Surface},
    scene::Scene,
};

/// What a finished run looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames rendered and presented.
    pub frames: u64,
}

/// Drives a [`Scene`] with events from `E`, presenting on `S` and timing with `C`.
pub struct FrameLoop<E, S, C> {
    events: E,
    surface: S,
    clock: C,
    quit_key: Key,
}

impl<E: EventSource, S: Surface, C: Clock> FrameLoop<E, S, C> {
    pub fn new(events: E, surface: S, clock: C, quit_key: Key) -> Self {
        Self {
            events,
            surface,
            clock,
            quit_key,
        }
    }

    /// Runs until a quit event or the quit key arrives.
    ///
    /// Quitting takes effect in the iteration the event is polled in: nothing is updated, drawn
    /// or presented after it.
    pub fn run<T: Scene>(&mut self, scene: &mut T) -> RunSummary {
        let mut running = true;
        let mut frames = 0;

        while running {
            running = self.pump(scene);
            if running {
                scene.update(self.clock.elapsed());
                scene.render();
                self.surface.present();
                frames += 1;
            }
        }

        log::info!(
            "Stopped after {frames} frames ({:.1}s)",
            self.clock.elapsed().as_secs_f32()
        );
        RunSummary { frames }
    }

    /// Drains pending events. Returns `false` once a quit request is seen; events after it in the
    /// same batch are dropped.
    fn pump<T: Scene>(&mut self, scene: &mut T) -> bool {
        for event in self.events.poll_events() {
            match event {
                Event::Quit => return false,
                Event::KeyDown(key) if key == self.quit_key => return false,
                other => scene.handle_event(&other),
            }
        }
        true
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}

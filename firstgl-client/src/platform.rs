//! SDL2 adapters for the frame loop's event source and presentation surface.

use firstgl_core::{Event, EventSource, Key, Surface};
use sdl2::{
    event::{Event as SdlEvent, WindowEvent},
    keyboard::Keycode,
    video::Window,
};

/// Polls the SDL2 event pump. Resize events report the drawable size of `window`.
pub struct SdlEvents<'a> {
    pub pump: &'a mut sdl2::EventPump,
    pub window: &'a Window,
}

impl EventSource for SdlEvents<'_> {
    fn poll_events(&mut self) -> Vec<Event> {
        let window = self.window;
        self.pump
            .poll_iter()
            .map(|event| match translate(&event) {
                Event::Resized { .. } => {
                    let (width, height) = window.drawable_size();
                    Event::Resized { width, height }
                }
                other => other,
            })
            .collect()
    }
}

/// Presents by swapping the window's GL buffers.
pub struct SdlSurface<'a>(pub &'a Window);

impl Surface for SdlSurface<'_> {
    fn present(&mut self) {
        self.0.gl_swap_window();
    }
}

/// Maps an SDL2 event onto the few the demos react to.
pub fn translate(event: &SdlEvent) -> Event {
    match event {
        SdlEvent::Quit { .. } => Event::Quit,
        SdlEvent::KeyDown {
            keycode: Some(keycode),
            ..
        } => Event::KeyDown(translate_key(*keycode)),
        SdlEvent::Window {
            win_event: WindowEvent::Resized(width, height),
            ..
        } => Event::Resized {
            width: u32::try_from(*width).unwrap_or(0),
            height: u32::try_from(*height).unwrap_or(0),
        },
        _ => Event::Other,
    }
}

pub fn translate_key(keycode: Keycode) -> Key {
    match keycode {
        Keycode::End => Key::End,
        Keycode::Escape => Key::Escape,
        Keycode::Q => Key::Q,
        _ => Key::Other,
    }
}

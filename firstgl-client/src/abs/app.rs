//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which owns the SDL2 window and the OpenGL 3.3 core
//! context every demo draws into.

use std::sync::Arc;

use firstgl_core::{DemoError, Result, WindowConfig};

use crate::abs::GlowGpu;

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
///
/// Anything holding a clone of `gl` has to be dropped before the [`App`]. Fields drop in
/// declaration order, so the context goes before the window it was created on.
pub struct App {
    pub gl: Arc<GlowGpu>,
    pub gl_context: sdl2::video::GLContext,
    pub window: sdl2::video::Window,
    pub event_pump: sdl2::EventPump,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub sdl: sdl2::Sdl,
}

impl App {
    /// Opens a centered window described by `config` and makes a GL 3.3 core context current on
    /// it.
    pub fn new(config: &WindowConfig) -> Result<Self> {
        let sdl = sdl2::init().map_err(DemoError::Window)?;
        let video_subsystem = sdl.video().map_err(DemoError::Window)?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        gl_attr.set_depth_size(24);
        gl_attr.set_double_buffer(true);

        let mut builder = video_subsystem.window(&config.title, config.width, config.height);
        builder.opengl().position_centered();
        if config.resizable {
            builder.resizable();
        }
        let window = builder
            .build()
            .map_err(|e| DemoError::Window(e.to_string()))?;

        let gl_context = window.gl_create_context().map_err(DemoError::Context)?;
        window
            .gl_make_current(&gl_context)
            .map_err(DemoError::Context)?;
        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl.event_pump().map_err(DemoError::Window)?;
        let gl = Arc::new(GlowGpu::new(gl));

        log::info!("OpenGL {} on {}", gl.version(), gl.renderer());

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl,
            event_pump,
        })
    }

    /// The size of the drawable area in pixels, which can differ from the window size on high
    /// density displays.
    pub fn drawable_size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }
}

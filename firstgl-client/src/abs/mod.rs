//! The SDL2 window and the OpenGL context behind it.

pub mod app;
pub mod gpu;

pub use app::*;
pub use gpu::*;

//! The core of the firstgl demos.
//!
//! The three demo programs (a triangle, a colored tumbling cube and a textured tumbling cube)
//! share one pattern: compile and link a shader program, upload static geometry, then update a
//! transform, draw and present every frame until asked to quit. This crate holds that pattern
//! independent of any windowing library; all GPU access goes through the [`gpu::Gpu`] trait and
//! all platform input/output through the traits in [`event`].

pub mod config;
pub mod demo;
pub mod error;
pub mod event;
pub mod geometry;
pub mod gpu;
pub mod mesh;
pub mod runner;
pub mod scene;
pub mod shader;
pub mod texture;
pub mod transform;

#[cfg(test)]
mod testing;

pub use config::{DemoConfig, WindowConfig};
pub use demo::{Demo, DemoDescriptor, DemoKind};
pub use error::{DemoError, Result};
pub use event::{Clock, Event, EventSource, Key, StartClock, Surface};
pub use gpu::{Gpu, ShaderStage};
pub use runner::{FrameLoop, RunSummary};
pub use scene::Scene;

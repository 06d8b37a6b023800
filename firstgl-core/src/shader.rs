//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] wrappers around GPU shader objects,
//! the [`ShaderSource`] enum describing where shader text comes from, and the [`Uniform`] trait
//! for setting uniform variables.

use std::{
    borrow::Cow,
    path::{Path, PathBuf},
    sync::Arc,
};

use glam::Mat4;

use crate::{
    error::{DemoError, Result},
    gpu::{Gpu, ShaderStage},
};

/// Where the text of a shader comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderSource {
    /// Source compiled into the binary.
    Inline {
        name: &'static str,
        text: &'static str,
    },
    /// A file name, resolved against the assets directory at load time.
    File(&'static str),
}

impl ShaderSource {
    /// A human-readable name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            ShaderSource::Inline { name, .. } => name,
            ShaderSource::File(file) => file,
        }
    }

    /// Returns the shader text, reading it from `assets_dir` if needed.
    pub fn load(&self, assets_dir: &Path) -> Result<Cow<'static, str>> {
        match self {
            ShaderSource::Inline { text, .. } => Ok(Cow::Borrowed(text)),
            ShaderSource::File(file) => {
                let path: PathBuf = assets_dir.join(file);
                let text = std::fs::read_to_string(&path)
                    .map_err(|source| DemoError::Asset { path, source })?;
                Ok(Cow::Owned(text))
            }
        }
    }
}

/// Represents an individual compiled shader.
pub struct Shader<G: Gpu> {
    gpu: Arc<G>,
    id: G::Shader,
}

impl<G: Gpu> Shader<G> {
    /// Compiles a new shader from the given source code. `name` only shows up in errors.
    pub fn new(gpu: &Arc<G>, stage: ShaderStage, name: &str, source: &str) -> Result<Self> {
        match gpu.compile_shader(stage, source) {
            Ok(id) => {
                log::debug!("Compiled {stage} shader {name}");
                Ok(Self {
                    gpu: Arc::clone(gpu),
                    id,
                })
            }
            Err(log) => {
                let log = if log.trim().is_empty() {
                    "(the driver returned no diagnostic output)".to_string()
                } else {
                    log
                };
                Err(DemoError::ShaderCompile {
                    stage,
                    name: name.to_string(),
                    log,
                })
            }
        }
    }

    /// Loads `source` relative to `assets_dir` and compiles it.
    pub fn from_source(
        gpu: &Arc<G>,
        stage: ShaderStage,
        source: &ShaderSource,
        assets_dir: &Path,
    ) -> Result<Self> {
        let text = source.load(assets_dir)?;
        let shader = Self::new(gpu, stage, source.name(), &text)?;
        log::info!("Shader {} loaded successfully", source.name());
        Ok(shader)
    }
}

impl<G: Gpu> Drop for Shader<G> {
    fn drop(&mut self) {
        self.gpu.delete_shader(self.id);
    }
}

/// Represents a uniform variable value that can be uploaded to a shader program.
pub trait Uniform {
    /// Uploads the value to the given location of the program in use.
    fn set_uniform<G: Gpu>(&self, gpu: &G, location: &G::UniformLocation);
}

impl Uniform for i32 {
    fn set_uniform<G: Gpu>(&self, gpu: &G, location: &G::UniformLocation) {
        gpu.set_uniform_i32(location, *self);
    }
}

impl Uniform for Mat4 {
    fn set_uniform<G: Gpu>(&self, gpu: &G, location: &G::UniformLocation) {
        gpu.set_uniform_mat4(location, self);
    }
}

/// A linked shader program.
pub struct ShaderProgram<G: Gpu> {
    gpu: Arc<G>,
    id: G::Program,
}

impl<G: Gpu> ShaderProgram<G> {
    /// Links a new shader program from the given shaders.
    pub fn new(gpu: &Arc<G>, shaders: &[&Shader<G>]) -> Result<Self> {
        let ids: Vec<G::Shader> = shaders.iter().map(|shader| shader.id).collect();
        let id = gpu.link_program(&ids).map_err(DemoError::ProgramLink)?;

        Ok(Self {
            gpu: Arc::clone(gpu),
            id,
        })
    }

    /// Resolves a vertex attribute by name.
    pub fn attrib_location(&self, name: &str) -> Result<u32> {
        self.gpu
            .attrib_location(self.id, name)
            .ok_or_else(|| DemoError::MissingAttribute(name.to_string()))
    }

    /// Resolves a uniform by name.
    pub fn uniform_location(&self, name: &str) -> Result<G::UniformLocation> {
        self.gpu
            .uniform_location(self.id, name)
            .ok_or_else(|| DemoError::MissingUniform(name.to_string()))
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        self.gpu.use_program(self.id);
    }

    /// Sets a uniform variable. The program must be in use.
    pub fn set_uniform<T: Uniform>(&self, location: &G::UniformLocation, value: T) {
        value.set_uniform(self.gpu.as_ref(), location);
    }
}

impl<G: Gpu> Drop for ShaderProgram<G> {
    fn drop(&mut self) {
        self.gpu.delete_program(self.id);
    }
}

use std::path::PathBuf;

use thiserror::Error;

use crate::gpu::ShaderStage;

pub type Result<T> = std::result::Result<T, DemoError>;

/// Everything that can go wrong while setting up or running a demo.
///
/// All of these are fatal for the binaries: they log the error and exit with
/// status 1. Library code only ever returns them.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("could not create window: {0}")]
    Window(String),

    #[error("could not create OpenGL context: {0}")]
    Context(String),

    #[error("{stage} shader `{name}` failed to compile:\n{log}")]
    ShaderCompile {
        stage: ShaderStage,
        name: String,
        log: String,
    },

    #[error("shader program failed to link:\n{0}")]
    ProgramLink(String),

    #[error("could not bind attribute `{0}`")]
    MissingAttribute(String),

    #[error("could not bind uniform `{0}`")]
    MissingUniform(String),

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("{}: {source}", path.display())]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not load texture {}: {source}", path.display())]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("GPU error: {0}")]
    Gpu(String),

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

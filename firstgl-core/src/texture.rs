//! Structs and functions for handling textures.
//!
//! [`ImageData`] is a decoded RGBA8 image on the CPU side; [`Texture`] is the GPU texture created
//! from it.

use std::{path::Path, sync::Arc};

use image::GenericImageView;

use crate::{
    error::{DemoError, Result},
    gpu::Gpu,
};

/// Tightly packed RGBA8 pixels, rows top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ImageData {
    /// Decodes the image at `path`, converting whatever it contains to RGBA8.
    pub fn load(path: &Path) -> Result<Self> {
        let image = image::open(path).map_err(|source| DemoError::Texture {
            path: path.to_path_buf(),
            source,
        })?;
        let (width, height) = image.dimensions();
        log::debug!("Decoded {} ({width}x{height})", path.display());

        Ok(Self {
            width,
            height,
            pixels: image.to_rgba8().into_raw(),
        })
    }
}

/// Represents a texture stored on the GPU side.
pub struct Texture<G: Gpu> {
    gpu: Arc<G>,
    id: G::Texture,
    width: u32,
    height: u32,
}

impl<G: Gpu> Texture<G> {
    /// Creates a new texture from the given decoded image.
    pub fn new(gpu: &Arc<G>, image: &ImageData) -> Result<Self> {
        let id = gpu
            .create_texture(image.width, image.height, &image.pixels)
            .map_err(DemoError::Gpu)?;

        Ok(Self {
            gpu: Arc::clone(gpu),
            id,
            width: image.width,
            height: image.height,
        })
    }

    /// Loads and uploads the image at `path`.
    pub fn load(gpu: &Arc<G>, path: &Path) -> Result<Self> {
        let texture = Self::new(gpu, &ImageData::load(path)?)?;
        log::info!("Texture {} loaded successfully", path.display());
        Ok(texture)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        self.gpu.bind_texture(unit, self.id);
    }
}

impl<G: Gpu> Drop for Texture<G> {
    fn drop(&mut self) {
        self.gpu.delete_texture(self.id);
    }
}

//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct, which owns the vertex array, one vertex buffer per
//! attribute and the index buffer of a [`Geometry`] uploaded to the GPU.

use std::sync::Arc;

use crate::{
    error::{DemoError, Result},
    geometry::Geometry,
    gpu::Gpu,
};

/// Represents a mesh stored on the GPU side.
pub struct Mesh<G: Gpu> {
    gpu: Arc<G>,
    vao: G::VertexArray,
    vbos: Vec<G::Buffer>,
    ebo: G::Buffer,
    index_count: usize,
}

impl<G: Gpu> Mesh<G> {
    /// Uploads the given geometry. `locations[i]` is the shader location of
    /// `geometry.attributes[i]`.
    pub fn new(gpu: &Arc<G>, geometry: &Geometry, locations: &[u32]) -> Result<Self> {
        geometry.validate()?;
        if locations.len() != geometry.attributes.len() {
            return Err(DemoError::InvalidGeometry(format!(
                "{} attribute locations for {} attributes",
                locations.len(),
                geometry.attributes.len()
            )));
        }

        let vao = gpu.create_vertex_array().map_err(DemoError::Gpu)?;
        let mut vbos = Vec::with_capacity(geometry.attributes.len());

        gpu.bind_vertex_array(Some(vao));
        let uploaded = upload(gpu.as_ref(), geometry, locations, &mut vbos);
        gpu.bind_vertex_array(None);

        match uploaded {
            Ok(ebo) => {
                log::debug!(
                    "Uploaded mesh with {} vertices and {} indices",
                    geometry.vertex_count(),
                    geometry.indices.len()
                );
                Ok(Self {
                    gpu: Arc::clone(gpu),
                    vao,
                    vbos,
                    ebo,
                    index_count: geometry.indices.len(),
                })
            }
            Err(err) => {
                for vbo in vbos {
                    gpu.delete_buffer(vbo);
                }
                gpu.delete_vertex_array(vao);
                Err(err)
            }
        }
    }

    /// Draws the mesh with a single indexed draw call over the whole index buffer.
    pub fn draw(&self) {
        self.gpu.bind_vertex_array(Some(self.vao));
        self.gpu.draw_indexed(self.index_count);
        self.gpu.bind_vertex_array(None);
    }

    /// Returns the amount of indices used in the mesh.
    pub fn index_count(&self) -> usize {
        self.index_count
    }
}

/// Uploads every attribute into its own buffer and returns the index buffer. Expects the mesh's
/// vertex array to be bound; buffers created before a failure are left in `vbos`.
fn upload<G: Gpu>(
    gpu: &G,
    geometry: &Geometry,
    locations: &[u32],
    vbos: &mut Vec<G::Buffer>,
) -> Result<G::Buffer> {
    for (attribute, &location) in geometry.attributes.iter().zip(locations) {
        let vbo = gpu
            .create_vertex_buffer(&attribute.data)
            .map_err(DemoError::Gpu)?;
        vbos.push(vbo);
        gpu.vertex_attrib(location, vbo, attribute.components);
    }

    gpu.create_index_buffer(&geometry.indices)
        .map_err(DemoError::Gpu)
}

impl<G: Gpu> Drop for Mesh<G> {
    fn drop(&mut self) {
        for vbo in self.vbos.drain(..) {
            self.gpu.delete_buffer(vbo);
        }
        self.gpu.delete_buffer(self.ebo);
        self.gpu.delete_vertex_array(self.vao);
    }
}

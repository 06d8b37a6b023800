//! The GPU seam.
//!
//! Every OpenGL call the demos make goes through the [`Gpu`] trait. The client crate implements
//! it on top of `glow`; the tests in this crate implement it with a recording fake so that
//! resource lifetimes and draw sequencing can be checked without a window.

use std::fmt;

use glam::Mat4;

/// The programmable pipeline stage a shader belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Minimal set of graphics operations needed to initialize, draw and tear down a demo.
///
/// Handle types are opaque and copyable, like the ones `glow` hands out. Creating a handle never
/// implies ownership on its own; the wrappers in [`crate::shader`], [`crate::mesh`] and
/// [`crate::texture`] delete what they create when dropped.
pub trait Gpu {
    type Shader: Copy + fmt::Debug;
    type Program: Copy + fmt::Debug;
    type Buffer: Copy + fmt::Debug;
    type VertexArray: Copy + fmt::Debug;
    type Texture: Copy + fmt::Debug;
    type UniformLocation: fmt::Debug;

    /// Compiles a shader. On failure returns the driver's info log, and the shader object is
    /// already deleted.
    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<Self::Shader, String>;
    fn delete_shader(&self, shader: Self::Shader);

    /// Attaches the shaders, links and detaches them again. On failure returns the link log, and
    /// the program object is already deleted.
    fn link_program(&self, shaders: &[Self::Shader]) -> Result<Self::Program, String>;
    fn delete_program(&self, program: Self::Program);
    fn use_program(&self, program: Self::Program);

    fn attrib_location(&self, program: Self::Program, name: &str) -> Option<u32>;
    fn uniform_location(&self, program: Self::Program, name: &str)
    -> Option<Self::UniformLocation>;
    fn set_uniform_mat4(&self, location: &Self::UniformLocation, value: &Mat4);
    fn set_uniform_i32(&self, location: &Self::UniformLocation, value: i32);

    fn create_vertex_array(&self) -> Result<Self::VertexArray, String>;
    fn bind_vertex_array(&self, vao: Option<Self::VertexArray>);
    fn delete_vertex_array(&self, vao: Self::VertexArray);

    /// Uploads static per-vertex data into a new array buffer.
    fn create_vertex_buffer(&self, data: &[f32]) -> Result<Self::Buffer, String>;
    /// Uploads static indices into a new element buffer and leaves it bound to the current
    /// vertex array.
    fn create_index_buffer(&self, indices: &[u16]) -> Result<Self::Buffer, String>;
    fn delete_buffer(&self, buffer: Self::Buffer);
    /// Points attribute `location` at `buffer`, tightly packed `f32`s with `components` values
    /// per vertex.
    fn vertex_attrib(&self, location: u32, buffer: Self::Buffer, components: usize);

    /// Creates a 2D texture from tightly packed RGBA8 pixels.
    fn create_texture(&self, width: u32, height: u32, rgba: &[u8])
    -> Result<Self::Texture, String>;
    fn bind_texture(&self, unit: u32, texture: Self::Texture);
    fn delete_texture(&self, texture: Self::Texture);

    fn viewport(&self, width: u32, height: u32);
    /// Clears the color buffer and, if `depth` is set, enables depth testing and clears the
    /// depth buffer too.
    fn clear(&self, color: [f32; 4], depth: bool);
    /// Draws `count` indices as triangles from the bound element buffer.
    fn draw_indexed(&self, count: usize);
}

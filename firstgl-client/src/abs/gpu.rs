//! The [`Gpu`] implementation on top of `glow`.

use firstgl_core::{Gpu, ShaderStage};
use glam::Mat4;
use glow::HasContext;

/// An OpenGL 3.3 core context reached through `glow`.
pub struct GlowGpu {
    gl: glow::Context,
}

impl GlowGpu {
    pub fn new(gl: glow::Context) -> Self {
        Self { gl }
    }

    /// The driver's version string.
    pub fn version(&self) -> String {
        unsafe { self.gl.get_parameter_string(glow::VERSION) }
    }

    /// The renderer string, usually naming the GPU.
    pub fn renderer(&self) -> String {
        unsafe { self.gl.get_parameter_string(glow::RENDERER) }
    }
}

fn as_bytes<T: Copy>(data: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(data.as_ptr().cast::<u8>(), std::mem::size_of_val(data)) }
}

impl Gpu for GlowGpu {
    type Shader = glow::Shader;
    type Program = glow::Program;
    type Buffer = glow::Buffer;
    type VertexArray = glow::VertexArray;
    type Texture = glow::Texture;
    type UniformLocation = glow::UniformLocation;

    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<glow::Shader, String> {
        let shader_type = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe {
            let shader = self.gl.create_shader(shader_type)?;
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);

            if !self.gl.get_shader_compile_status(shader) {
                let log = self.gl.get_shader_info_log(shader);
                self.gl.delete_shader(shader);
                return Err(log);
            }

            Ok(shader)
        }
    }

    fn delete_shader(&self, shader: glow::Shader) {
        unsafe {
            self.gl.delete_shader(shader);
        }
    }

    fn link_program(&self, shaders: &[glow::Shader]) -> Result<glow::Program, String> {
        unsafe {
            let program = self.gl.create_program()?;

            for shader in shaders {
                self.gl.attach_shader(program, *shader);
            }

            self.gl.link_program(program);

            if !self.gl.get_program_link_status(program) {
                let log = self.gl.get_program_info_log(program);
                self.gl.delete_program(program);
                return Err(log);
            }

            for shader in shaders {
                self.gl.detach_shader(program, *shader);
            }

            Ok(program)
        }
    }

    fn delete_program(&self, program: glow::Program) {
        unsafe {
            self.gl.delete_program(program);
        }
    }

    fn use_program(&self, program: glow::Program) {
        unsafe {
            self.gl.use_program(Some(program));
        }
    }

    fn attrib_location(&self, program: glow::Program, name: &str) -> Option<u32> {
        unsafe { self.gl.get_attrib_location(program, name) }
    }

    fn uniform_location(&self, program: glow::Program, name: &str) -> Option<glow::UniformLocation> {
        unsafe { self.gl.get_uniform_location(program, name) }
    }

    fn set_uniform_mat4(&self, location: &glow::UniformLocation, value: &Mat4) {
        unsafe {
            self.gl
                .uniform_matrix_4_f32_slice(Some(location), false, value.as_ref());
        }
    }

    fn set_uniform_i32(&self, location: &glow::UniformLocation, value: i32) {
        unsafe {
            self.gl.uniform_1_i32(Some(location), value);
        }
    }

    fn create_vertex_array(&self) -> Result<glow::VertexArray, String> {
        unsafe { self.gl.create_vertex_array() }
    }

    fn bind_vertex_array(&self, vao: Option<glow::VertexArray>) {
        unsafe {
            self.gl.bind_vertex_array(vao);
        }
    }

    fn delete_vertex_array(&self, vao: glow::VertexArray) {
        unsafe {
            self.gl.delete_vertex_array(vao);
        }
    }

    fn create_vertex_buffer(&self, data: &[f32]) -> Result<glow::Buffer, String> {
        unsafe {
            let vbo = self.gl.create_buffer()?;
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            self.gl
                .buffer_data_u8_slice(glow::ARRAY_BUFFER, as_bytes(data), glow::STATIC_DRAW);
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
            Ok(vbo)
        }
    }

    fn create_index_buffer(&self, indices: &[u16]) -> Result<glow::Buffer, String> {
        unsafe {
            let ebo = self.gl.create_buffer()?;
            // Stays bound so the current vertex array records it.
            self.gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            self.gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                as_bytes(indices),
                glow::STATIC_DRAW,
            );
            Ok(ebo)
        }
    }

    fn delete_buffer(&self, buffer: glow::Buffer) {
        unsafe {
            self.gl.delete_buffer(buffer);
        }
    }

    fn vertex_attrib(&self, location: u32, buffer: glow::Buffer, components: usize) {
        unsafe {
            self.gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
            self.gl.enable_vertex_attrib_array(location);
            self.gl.vertex_attrib_pointer_f32(
                location,
                components as i32,
                glow::FLOAT,
                false,
                0,
                0,
            );
            self.gl.bind_buffer(glow::ARRAY_BUFFER, None);
        }
    }

    fn create_texture(&self, width: u32, height: u32, rgba: &[u8]) -> Result<glow::Texture, String> {
        unsafe {
            let texture = self.gl.create_texture()?;
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(rgba)),
            );
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            self.gl.bind_texture(glow::TEXTURE_2D, None);
            Ok(texture)
        }
    }

    fn bind_texture(&self, unit: u32, texture: glow::Texture) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
        }
    }

    fn delete_texture(&self, texture: glow::Texture) {
        unsafe {
            self.gl.delete_texture(texture);
        }
    }

    fn viewport(&self, width: u32, height: u32) {
        unsafe {
            self.gl.viewport(0, 0, width as i32, height as i32);
        }
    }

    fn clear(&self, color: [f32; 4], depth: bool) {
        let [r, g, b, a] = color;
        unsafe {
            self.gl.clear_color(r, g, b, a);
            if depth {
                self.gl.enable(glow::DEPTH_TEST);
                self.gl
                    .clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
            } else {
                self.gl.disable(glow::DEPTH_TEST);
                self.gl.clear(glow::COLOR_BUFFER_BIT);
            }
        }
    }

    fn draw_indexed(&self, count: usize) {
        unsafe {
            self.gl
                .draw_elements(glow::TRIANGLES, count as i32, glow::UNSIGNED_SHORT, 0);
        }
    }
}

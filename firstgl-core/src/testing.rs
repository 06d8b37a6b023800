//! A recording [`Gpu`] and scripted platform stand-ins used by the unit tests.

use std::{
    cell::{Cell, RefCell},
    collections::{HashMap, VecDeque},
    time::Duration,
};

use glam::Mat4;

use crate::{
    event::{Clock, Event, EventSource, Surface},
    gpu::{Gpu, ShaderStage},
};

pub const VALID_VERTEX: &str = "#version 330 core
in vec3 coord3d;
in vec3 v_color;
out vec3 f_color;
uniform mat4 mvp;
void main() {
    gl_Position = mvp * vec4(coord3d, 1.0);
    f_color = v_color;
}
";

pub const VALID_FRAGMENT: &str = "#version 330 core
in vec3 f_color;
out vec4 frag_color;
void main() {
    frag_color = vec4(f_color, 1.0);
}
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Shader,
    Program,
    Buffer,
    VertexArray,
    Texture,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CompileShader(ShaderStage),
    DeleteShader(u32),
    LinkProgram(u32),
    DeleteProgram(u32),
    UseProgram(u32),
    SetMat4(u32, Mat4),
    SetI32(u32, i32),
    CreateVertexArray(u32),
    BindVertexArray(Option<u32>),
    DeleteVertexArray(u32),
    CreateVertexBuffer { id: u32, len: usize },
    CreateIndexBuffer { id: u32, len: usize },
    DeleteBuffer(u32),
    VertexAttrib { location: u32, buffer: u32, components: usize },
    CreateTexture { id: u32, width: u32, height: u32 },
    BindTexture { unit: u32, texture: u32 },
    DeleteTexture(u32),
    Viewport(u32, u32),
    Clear { color: [f32; 4], depth: bool },
    DrawIndexed(usize),
}

/// Records every call and tracks how often each handle was deleted.
#[derive(Default)]
pub struct FakeGpu {
    pub silent_compile_errors: Cell<bool>,
    pub fail_link: Cell<bool>,
    next_id: Cell<u32>,
    calls: RefCell<Vec<Call>>,
    deletions: RefCell<HashMap<(Kind, u32), u32>>,
    shader_sources: RefCell<HashMap<u32, String>>,
    program_sources: RefCell<HashMap<u32, String>>,
}

impl FakeGpu {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn draw_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, Call::DrawIndexed(_)))
            .count()
    }

    /// Handles that were created but never deleted.
    pub fn leaks(&self) -> Vec<(Kind, u32)> {
        self.deletions
            .borrow()
            .iter()
            .filter(|(_, count)| **count == 0)
            .map(|(key, _)| *key)
            .collect()
    }

    /// Handles deleted more than once, or deleted without ever being created.
    pub fn double_frees(&self) -> Vec<(Kind, u32)> {
        self.deletions
            .borrow()
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(key, _)| *key)
            .collect()
    }

    pub fn created(&self, kind: Kind) -> usize {
        self.deletions
            .borrow()
            .keys()
            .filter(|(k, _)| *k == kind)
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate(&self, kind: Kind) -> u32 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        self.deletions.borrow_mut().insert((kind, id), 0);
        id
    }

    fn release(&self, kind: Kind, id: u32) {
        // Unknown handles count as a double free.
        *self.deletions.borrow_mut().entry((kind, id)).or_insert(1) += 1;
    }

    fn locate(&self, program: u32, name: &str) -> Option<u32> {
        self.program_sources
            .borrow()
            .get(&program)
            .and_then(|source| source.find(name))
            .map(|offset| offset as u32)
    }
}

impl Gpu for FakeGpu {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;
    type Texture = u32;
    type UniformLocation = u32;

    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<u32, String> {
        self.record(Call::CompileShader(stage));
        if !source.contains("void main") {
            return Err(if self.silent_compile_errors.get() {
                String::new()
            } else {
                "0:1(1): error: syntax error, unexpected IDENTIFIER".to_string()
            });
        }
        let id = self.allocate(Kind::Shader);
        self.shader_sources
            .borrow_mut()
            .insert(id, source.to_string());
        Ok(id)
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader(shader));
        self.release(Kind::Shader, shader);
    }

    fn link_program(&self, shaders: &[u32]) -> Result<u32, String> {
        if self.fail_link.get() {
            return Err("error: vertex shader output `f_color` not read by fragment".to_string());
        }
        let id = self.allocate(Kind::Program);
        let sources = self.shader_sources.borrow();
        let combined: String = shaders
            .iter()
            .filter_map(|shader| sources.get(shader))
            .map(String::as_str)
            .collect();
        self.program_sources.borrow_mut().insert(id, combined);
        self.record(Call::LinkProgram(id));
        Ok(id)
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram(program));
        self.release(Kind::Program, program);
    }

    fn use_program(&self, program: u32) {
        self.record(Call::UseProgram(program));
    }

    fn attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        self.locate(program, name)
    }

    fn uniform_location(&self, program: u32, name: &str) -> Option<u32> {
        self.locate(program, name)
    }

    fn set_uniform_mat4(&self, location: &u32, value: &Mat4) {
        self.record(Call::SetMat4(*location, *value));
    }

    fn set_uniform_i32(&self, location: &u32, value: i32) {
        self.record(Call::SetI32(*location, value));
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let id = self.allocate(Kind::VertexArray);
        self.record(Call::CreateVertexArray(id));
        Ok(id)
    }

    fn bind_vertex_array(&self, vao: Option<u32>) {
        self.record(Call::BindVertexArray(vao));
    }

    fn delete_vertex_array(&self, vao: u32) {
        self.record(Call::DeleteVertexArray(vao));
        self.release(Kind::VertexArray, vao);
    }

    fn create_vertex_buffer(&self, data: &[f32]) -> Result<u32, String> {
        let id = self.allocate(Kind::Buffer);
        self.record(Call::CreateVertexBuffer {
            id,
            len: data.len(),
        });
        Ok(id)
    }

    fn create_index_buffer(&self, indices: &[u16]) -> Result<u32, String> {
        let id = self.allocate(Kind::Buffer);
        self.record(Call::CreateIndexBuffer {
            id,
            len: indices.len(),
        });
        Ok(id)
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer(buffer));
        self.release(Kind::Buffer, buffer);
    }

    fn vertex_attrib(&self, location: u32, buffer: u32, components: usize) {
        self.record(Call::VertexAttrib {
            location,
            buffer,
            components,
        });
    }

    fn create_texture(&self, width: u32, height: u32, rgba: &[u8]) -> Result<u32, String> {
        if rgba.len() != (width * height * 4) as usize {
            return Err("pixel data does not match dimensions".to_string());
        }
        let id = self.allocate(Kind::Texture);
        self.record(Call::CreateTexture { id, width, height });
        Ok(id)
    }

    fn bind_texture(&self, unit: u32, texture: u32) {
        self.record(Call::BindTexture { unit, texture });
    }

    fn delete_texture(&self, texture: u32) {
        self.record(Call::DeleteTexture(texture));
        self.release(Kind::Texture, texture);
    }

    fn viewport(&self, width: u32, height: u32) {
        self.record(Call::Viewport(width, height));
    }

    fn clear(&self, color: [f32; 4], depth: bool) {
        self.record(Call::Clear { color, depth });
    }

    fn draw_indexed(&self, count: usize) {
        self.record(Call::DrawIndexed(count));
    }
}

/// Hands out one scripted batch per poll, then keeps asking to quit.
pub struct Script(VecDeque<Vec<Event>>);

impl Script {
    pub fn new(batches: Vec<Vec<Event>>) -> Self {
        Self(batches.into())
    }
}

impl EventSource for Script {
    fn poll_events(&mut self) -> Vec<Event> {
        self.0.pop_front().unwrap_or_else(|| vec![Event::Quit])
    }
}

/// Counts presented frames.
#[derive(Default)]
pub struct Screen {
    pub presented: u64,
}

impl Surface for Screen {
    fn present(&mut self) {
        self.presented += 1;
    }
}

/// Advances by a fixed step every time it is read.
pub struct SteppingClock {
    now: Cell<Duration>,
    step: Duration,
}

impl SteppingClock {
    pub fn new(step: Duration) -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn elapsed(&self) -> Duration {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}

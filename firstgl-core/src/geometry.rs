//! Static geometry tables for the demos.
//!
//! Attributes are kept as separate, parallel arrays (one buffer per attribute) rather than an
//! interleaved vertex struct; every attribute holds exactly one element per vertex.

use crate::error::{DemoError, Result};

const TRIANGLE_POSITIONS: [[f32; 2]; 3] = [[0.0, 0.5], [-0.5, -0.5], [0.5, -0.5]];
const TRIANGLE_INDICES: [u16; 3] = [0, 1, 2];

const CUBE_POSITIONS: [[f32; 3]; 8] = [
    // front
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    // back
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
];

const CUBE_COLORS: [[f32; 3]; 8] = [
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 1.0, 1.0],
];

#[rustfmt::skip]
const CUBE_INDICES: [u16; 36] = [
    // front
    0, 1, 2, 2, 3, 0,
    // right
    1, 5, 6, 6, 2, 1,
    // back
    7, 6, 5, 5, 4, 7,
    // left
    4, 0, 3, 3, 7, 4,
    // bottom
    4, 5, 1, 1, 0, 4,
    // top
    3, 2, 6, 6, 7, 3,
];

/// Four corners per face so that every face gets the full texture.
const TEXTURED_CUBE_POSITIONS: [[f32; 3]; 24] = [
    // front
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    // top
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, 1.0, -1.0],
    [-1.0, 1.0, -1.0],
    // back
    [1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    // bottom
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [-1.0, -1.0, 1.0],
    // left
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, 1.0, -1.0],
    // right
    [1.0, -1.0, 1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
];

const FACE_TEXCOORDS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

/// One named per-vertex input.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexAttribute {
    /// The attribute name in the vertex shader.
    pub name: &'static str,
    /// Number of `f32` components per vertex.
    pub components: usize,
    pub data: Vec<f32>,
}

impl VertexAttribute {
    pub fn new(name: &'static str, components: usize, data: &[f32]) -> Self {
        Self {
            name,
            components,
            data: data.to_vec(),
        }
    }

    /// The number of whole vertices this attribute covers.
    pub fn vertex_count(&self) -> usize {
        self.data.len() / self.components.max(1)
    }
}

/// Indexed triangle geometry. The first attribute is the position.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub attributes: Vec<VertexAttribute>,
    pub indices: Vec<u16>,
}

impl Geometry {
    /// The flat 2D triangle.
    pub fn triangle() -> Self {
        Self {
            attributes: vec![VertexAttribute::new(
                "coord2d",
                2,
                TRIANGLE_POSITIONS.as_flattened(),
            )],
            indices: TRIANGLE_INDICES.to_vec(),
        }
    }

    /// The eight-corner cube with one color per corner.
    pub fn colored_cube() -> Self {
        Self {
            attributes: vec![
                VertexAttribute::new("coord3d", 3, CUBE_POSITIONS.as_flattened()),
                VertexAttribute::new("v_color", 3, CUBE_COLORS.as_flattened()),
            ],
            indices: CUBE_INDICES.to_vec(),
        }
    }

    /// The 24-vertex cube with texture coordinates repeated on every face.
    pub fn textured_cube() -> Self {
        let texcoords: Vec<f32> = FACE_TEXCOORDS
            .as_flattened()
            .iter()
            .copied()
            .cycle()
            .take(TEXTURED_CUBE_POSITIONS.len() * 2)
            .collect();

        let indices = (0..6u16)
            .flat_map(|face| {
                let base = face * 4;
                [base, base + 1, base + 2, base + 2, base + 3, base]
            })
            .collect();

        Self {
            attributes: vec![
                VertexAttribute::new("coord3d", 3, TEXTURED_CUBE_POSITIONS.as_flattened()),
                VertexAttribute::new("texcoord", 2, &texcoords),
            ],
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.attributes
            .first()
            .map(VertexAttribute::vertex_count)
            .unwrap_or(0)
    }

    /// Checks that the attributes agree on the vertex count and that every index points at an
    /// existing vertex.
    pub fn validate(&self) -> Result<()> {
        let vertex_count = self.vertex_count();
        if vertex_count == 0 {
            return Err(DemoError::InvalidGeometry("no vertices".to_string()));
        }
        if self.indices.is_empty() || !self.indices.len().is_multiple_of(3) {
            return Err(DemoError::InvalidGeometry(format!(
                "{} indices do not form whole triangles",
                self.indices.len()
            )));
        }

        for attribute in &self.attributes {
            if attribute.components == 0
                || attribute.data.len() != vertex_count * attribute.components
            {
                return Err(DemoError::InvalidGeometry(format!(
                    "attribute `{}` has {} values, expected {} x {}",
                    attribute.name,
                    attribute.data.len(),
                    vertex_count,
                    attribute.components
                )));
            }
        }

        if let Some((position, index)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, index)| usize::from(**index) >= vertex_count)
        {
            return Err(DemoError::InvalidGeometry(format!(
                "index {index} at position {position} is out of bounds for {vertex_count} vertices"
            )));
        }

        Ok(())
    }
}

//! Geometry primitives for the attitude cube
use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);

    /// Perceived brightness in `[0, 1]` (Rec. 601 weights)
    pub fn luminance(self) -> f32 {
        (0.299 * self.0 as f32 + 0.587 * self.1 as f32 + 0.114 * self.2 as f32) / 255.0
    }
}

/// Number of cube corners
pub const VERTEX_COUNT: usize = 8;

/// Number of cube sides
pub const FACE_COUNT: usize = 6;

/// Corners of the unit cube (half-extent 1)
pub const CUBE_VERTICES: [[f32; 3]; VERTEX_COUNT] = [
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
];

/// Quad faces as vertex indices, consistent winding per side
pub const CUBE_FACES: [[usize; 4]; FACE_COUNT] = [
    [0, 1, 3, 2], // x = -1
    [4, 5, 7, 6], // x = +1
    [0, 1, 5, 4], // y = -1
    [2, 3, 7, 6], // y = +1
    [0, 2, 6, 4], // z = -1
    [1, 3, 7, 5], // z = +1
];

/// Default flat color per face: red, green, blue, yellow, orange, purple
pub const DEFAULT_FACE_COLORS: [Rgb; FACE_COUNT] = [
    Rgb(255, 0, 0),
    Rgb(0, 255, 0),
    Rgb(0, 0, 255),
    Rgb(255, 255, 0),
    Rgb(255, 165, 0),
    Rgb(128, 0, 128),
];

/// A planar quadrilateral referencing four cube vertices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub indices: [usize; 4],
    pub color: Rgb,
}

impl Face {
    pub fn new(indices: [usize; 4], color: Rgb) -> Self {
        Self { indices, color }
    }

    /// True when all four indices are distinct and below `vertex_count`
    pub fn is_valid(&self, vertex_count: usize) -> bool {
        self.indices.iter().all(|&i| i < vertex_count)
            && self
                .indices
                .iter()
                .enumerate()
                .all(|(n, i)| !self.indices[n + 1..].contains(i))
    }
}

/// The fixed cube: 8 model-space corners and 6 colored faces
#[derive(Debug, Clone)]
pub struct Cube {
    vertices: [Point3<f32>; VERTEX_COUNT],
    faces: [Face; FACE_COUNT],
}

impl Cube {
    pub fn new() -> Self {
        Self::with_colors(DEFAULT_FACE_COLORS)
    }

    /// The standard cube with a custom palette, one color per face
    pub fn with_colors(colors: [Rgb; FACE_COUNT]) -> Self {
        let vertices = CUBE_VERTICES.map(|[x, y, z]| Point3::new(x, y, z));
        let mut faces = [Face::new([0; 4], Rgb::BLACK); FACE_COUNT];
        for (face, (indices, color)) in faces.iter_mut().zip(CUBE_FACES.iter().zip(colors)) {
            *face = Face::new(*indices, color);
        }
        Self { vertices, faces }
    }

    pub fn vertices(&self) -> &[Point3<f32>; VERTEX_COUNT] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face; FACE_COUNT] {
        &self.faces
    }
}

impl Default for Cube {
    fn default() -> Self {
        Self::new()
    }
}

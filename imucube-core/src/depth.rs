//! Painter's-algorithm face ordering.
//!
//! Faces are drawn back-to-front by the average z of their corners, larger z
//! being farther from the camera. This needs no depth buffer only because the
//! cube is convex and its faces never intersect; other geometry would need
//! per-pixel depth testing instead.
use nalgebra::Point3;

use crate::geometry::{Face, FACE_COUNT};

/// Sort key pairing a face's average depth with its index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthKey {
    pub depth: f32,
    pub face: usize,
}

impl DepthKey {
    pub fn new(depth: f32, face: usize) -> Self {
        // Fold -0.0 into +0.0 so both compare equal under total ordering
        Self {
            depth: depth + 0.0,
            face,
        }
    }
}

/// Average z of a face's four transformed corners
pub fn face_depth(vertices: &[Point3<f32>], face: &Face) -> f32 {
    face.indices.iter().map(|&i| vertices[i].z).sum::<f32>() / 4.0
}

/// One depth key per face, in face index order
pub fn face_depths(vertices: &[Point3<f32>], faces: &[Face; FACE_COUNT]) -> [DepthKey; FACE_COUNT] {
    let mut keys = [DepthKey::new(0.0, 0); FACE_COUNT];
    for (i, (key, face)) in keys.iter_mut().zip(faces).enumerate() {
        *key = DepthKey::new(face_depth(vertices, face), i);
    }
    keys
}

/// Sort keys farthest first. Equal depths keep their incoming order.
pub fn sort_back_to_front(keys: &mut [DepthKey]) {
    keys.sort_by(|a, b| b.depth.total_cmp(&a.depth));
}

/// Face indices in draw order for this frame
pub fn draw_order(vertices: &[Point3<f32>], faces: &[Face; FACE_COUNT]) -> [usize; FACE_COUNT] {
    let mut keys = face_depths(vertices, faces);
    sort_back_to_front(&mut keys);
    keys.map(|k| k.face)
}

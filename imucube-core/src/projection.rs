//! Perspective projection onto the render surface
use nalgebra::Point3;

use crate::config::ViewerConfig;

/// Denominators closer to zero than this are treated as degenerate
const MIN_DEPTH: f32 = 1e-6;

/// Largest pixel coordinate magnitude accepted from a projection
const MAX_COORD: f32 = (1 << 24) as f32;

/// A pixel position on the render surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Simple perspective-divide projector.
///
/// `scale = k / (z + distance)`, and the scaled x/y are offset to the
/// surface center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    pub k: f32,
    pub distance: f32,
    pub width: u32,
    pub height: u32,
}

impl Projector {
    pub fn new(k: f32, distance: f32, width: u32, height: u32) -> Self {
        Self {
            k,
            distance,
            width,
            height,
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        Self::new(
            config.projection_k,
            config.camera_distance,
            config.width,
            config.height,
        )
    }

    /// Perspective scale factor for a given depth, or `None` when the
    /// denominator collapses
    pub fn scale(&self, z: f32) -> Option<f32> {
        let denom = z + self.distance;
        if denom.abs() < MIN_DEPTH {
            return None;
        }
        let scale = self.k / denom;
        scale.is_finite().then_some(scale)
    }

    /// Project a transformed point to screen space.
    ///
    /// Returns `None` for non-finite or wildly out-of-range results so the
    /// caller can skip the face instead of drawing garbage.
    pub fn project(&self, point: &Point3<f32>) -> Option<ScreenPoint> {
        let scale = self.scale(point.z)?;
        let sx = (point.x * scale + self.width as f32 / 2.0).round();
        let sy = (point.y * scale + self.height as f32 / 2.0).round();

        if !sx.is_finite() || !sy.is_finite() || sx.abs() > MAX_COORD || sy.abs() > MAX_COORD {
            return None;
        }

        Some(ScreenPoint::new(sx as i32, sy as i32))
    }

    /// Project all corners of a face; `None` if any corner is degenerate
    pub fn project_face(
        &self,
        vertices: &[Point3<f32>],
        indices: &[usize; 4],
    ) -> Option<[ScreenPoint; 4]> {
        let mut out = [ScreenPoint::new(0, 0); 4];
        for (slot, &i) in out.iter_mut().zip(indices) {
            *slot = self.project(vertices.get(i)?)?;
        }
        Some(out)
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}

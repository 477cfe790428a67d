//! Orientation state and the fixed-order cube rotation
use nalgebra::{Point3, Rotation3, Vector3};

use crate::geometry::VERTEX_COUNT;

/// Sensor attitude around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Orientation {
    pub roll: f32,
    pub pitch: f32,
    pub yaw: f32,
}

impl Orientation {
    pub fn new(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self { roll, pitch, yaw }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Build from angles given in degrees
    pub fn from_degrees(roll: f32, pitch: f32, yaw: f32) -> Self {
        Self {
            roll: roll.to_radians(),
            pitch: pitch.to_radians(),
            yaw: yaw.to_radians(),
        }
    }

    /// `(roll, pitch, yaw)` in degrees
    pub fn to_degrees(&self) -> (f32, f32, f32) {
        (
            self.roll.to_degrees(),
            self.pitch.to_degrees(),
            self.yaw.to_degrees(),
        )
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, droll: f32, dpitch: f32, dyaw: f32) {
        self.roll += droll;
        self.pitch += dpitch;
        self.yaw += dyaw;
    }

    pub fn is_finite(&self) -> bool {
        self.roll.is_finite() && self.pitch.is_finite() && self.yaw.is_finite()
    }
}

/// Rotate about the X axis (right-handed)
pub fn rotate_x(p: &Point3<f32>, angle: f32) -> Point3<f32> {
    let (s, c) = angle.sin_cos();
    Point3::new(p.x, p.y * c - p.z * s, p.y * s + p.z * c)
}

/// Rotate about the Y axis (right-handed)
pub fn rotate_y(p: &Point3<f32>, angle: f32) -> Point3<f32> {
    let (s, c) = angle.sin_cos();
    Point3::new(p.x * c + p.z * s, p.y, -p.x * s + p.z * c)
}

/// Rotate about the Z axis (right-handed)
pub fn rotate_z(p: &Point3<f32>, angle: f32) -> Point3<f32> {
    let (s, c) = angle.sin_cos();
    Point3::new(p.x * c - p.y * s, p.x * s + p.y * c, p.z)
}

/// Apply an orientation to a model-space point.
///
/// The order is part of the contract: X by `pitch`, then Y by `yaw`, then
/// Z by `roll`, each step consuming the previous result. Rotations do not
/// commute, so callers go through this function instead of chaining the
/// single-axis helpers themselves.
pub fn rotate(p: &Point3<f32>, orientation: &Orientation) -> Point3<f32> {
    let p = rotate_x(p, orientation.pitch);
    let p = rotate_y(&p, orientation.yaw);
    rotate_z(&p, orientation.roll)
}

/// Rotate every cube corner for the current frame
pub fn transform_vertices(
    vertices: &[Point3<f32>; VERTEX_COUNT],
    orientation: &Orientation,
) -> [Point3<f32>; VERTEX_COUNT] {
    vertices.map(|v| rotate(&v, orientation))
}

/// Matrix builders for the same rotation
pub struct Transform;

impl Transform {
    /// Rotation matrix equivalent to [`rotate`]
    pub fn rotation_matrix(orientation: &Orientation) -> Rotation3<f32> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), orientation.pitch);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), orientation.yaw);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), orientation.roll);

        // Applied right to left: X, then Y, then Z
        rz * ry * rx
    }
}

//! Viewer configuration: surface, projection, pacing and colors
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ConfigError;
use crate::geometry::{Rgb, DEFAULT_FACE_COLORS, FACE_COUNT};

/// Largest accepted surface side in pixels
pub const MAX_SURFACE_SIDE: u32 = 8192;

/// Largest accepted outline thickness in pixels
pub const MAX_OUTLINE_WIDTH: u32 = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Render surface width in pixels.
    pub width: u32,
    /// Render surface height in pixels.
    pub height: u32,
    /// Projection constant `k` in `scale = k / (z + distance)`.
    pub projection_k: f32,
    /// Camera distance offset added to every depth before the divide.
    pub camera_distance: f32,
    /// Frame rate cap.
    pub target_fps: u32,
    /// Clear color for each frame.
    pub background: Rgb,
    /// Face outline color.
    pub outline: Rgb,
    /// Face outline thickness in pixels.
    pub outline_width: u32,
    /// HUD text color.
    pub hud: Rgb,
    /// One flat color per cube face, in face order.
    pub face_colors: [Rgb; FACE_COUNT],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            projection_k: 200.0,
            camera_distance: 5.0,
            target_fps: 60,
            background: Rgb(10, 10, 30),
            outline: Rgb::BLACK,
            outline_width: 2,
            hud: Rgb::WHITE,
            face_colors: DEFAULT_FACE_COLORS,
        }
    }
}

impl ViewerConfig {
    /// Reject values the render pipeline cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::invalid(
                "width/height",
                format!("surface must be non-empty, got {}x{}", self.width, self.height),
            ));
        }
        if self.width > MAX_SURFACE_SIDE || self.height > MAX_SURFACE_SIDE {
            return Err(ConfigError::invalid(
                "width/height",
                format!(
                    "each side must be at most {MAX_SURFACE_SIDE}, got {}x{}",
                    self.width, self.height
                ),
            ));
        }
        if self.outline_width > MAX_OUTLINE_WIDTH {
            return Err(ConfigError::invalid(
                "outline_width",
                format!(
                    "must be at most {MAX_OUTLINE_WIDTH}, got {}",
                    self.outline_width
                ),
            ));
        }
        if !self.projection_k.is_finite() || self.projection_k <= 0.0 {
            return Err(ConfigError::invalid(
                "projection_k",
                format!("must be positive and finite, got {}", self.projection_k),
            ));
        }
        if !self.camera_distance.is_finite() {
            return Err(ConfigError::invalid(
                "camera_distance",
                format!("must be finite, got {}", self.camera_distance),
            ));
        }
        if self.target_fps == 0 {
            return Err(ConfigError::invalid("target_fps", "must be at least 1"));
        }
        if self.camera_distance <= 1.0 {
            warn!(
                camera_distance = self.camera_distance,
                "Camera distance does not clear the cube; faces may be skipped"
            );
        }
        Ok(())
    }
}

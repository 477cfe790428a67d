//! Per-frame pipeline shared by every host
use tracing::{debug, info};

use crate::config::ViewerConfig;
use crate::error::SurfaceError;
use crate::geometry::{Cube, Rgb};
use crate::projection::{Projector, ScreenPoint};
use crate::render::{render_cube, RenderStats, RenderStyle};
use crate::source::AngleSource;
use crate::surface::RenderSurface;
use crate::transform::{transform_vertices, Orientation};

/// Where the HUD line is drawn
pub const HUD_POSITION: ScreenPoint = ScreenPoint { x: 20, y: 20 };

/// State carried from one frame to the next
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationState {
    /// Last good orientation; held when a poll yields nothing.
    pub orientation: Orientation,
    /// Frames completed so far.
    pub frame: u64,
    /// Frame at which the orientation last changed.
    pub last_update: Option<u64>,
}

/// Outcome of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub orientation: Orientation,
    /// Whether this frame's poll delivered a new reading
    pub updated: bool,
    pub stats: RenderStats,
}

/// HUD text for an orientation, angles in degrees
pub fn hud_text(orientation: &Orientation) -> String {
    let (roll, pitch, yaw) = orientation.to_degrees();
    format!("Roll: {roll:.1}°  Pitch: {pitch:.1}°  Yaw: {yaw:.1}°")
}

/// Owns the angle source and the simulation state, and runs one frame at a
/// time against a render surface
pub struct FrameDriver<S: AngleSource> {
    source: S,
    cube: Cube,
    projector: Projector,
    style: RenderStyle,
    background: Rgb,
    hud: Rgb,
    state: SimulationState,
    released: bool,
}

impl<S: AngleSource> FrameDriver<S> {
    pub fn new(source: S, config: &ViewerConfig) -> Self {
        Self {
            source,
            cube: Cube::with_colors(config.face_colors),
            projector: Projector::from_config(config),
            style: RenderStyle::from_config(config),
            background: config.background,
            hud: config.hud,
            state: SimulationState::default(),
            released: false,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Clear, poll, transform, draw, overlay the HUD and present
    pub fn step<R: RenderSurface + ?Sized>(
        &mut self,
        surface: &mut R,
    ) -> Result<FrameReport, SurfaceError> {
        surface.clear(self.background);

        let updated = match self.source.poll() {
            Some(orientation) => {
                self.state.orientation = orientation;
                self.state.last_update = Some(self.state.frame);
                true
            }
            None => false,
        };

        let transformed = transform_vertices(self.cube.vertices(), &self.state.orientation);
        let stats = render_cube(surface, &self.cube, &transformed, &self.projector, &self.style);

        surface.draw_text(HUD_POSITION, &hud_text(&self.state.orientation), self.hud);
        surface.present()?;

        let report = FrameReport {
            frame: self.state.frame,
            orientation: self.state.orientation,
            updated,
            stats,
        };
        self.state.frame += 1;

        if stats.skipped > 0 {
            debug!(frame = report.frame, skipped = stats.skipped, "Faces skipped");
        }
        Ok(report)
    }

    /// Release the angle source. Only the first call reaches the source.
    pub fn shutdown(&mut self) {
        if self.released {
            return;
        }
        self.source.release();
        self.released = true;
        info!(
            source = %self.source.name(),
            frames = self.state.frame,
            "Angle source released"
        );
    }
}

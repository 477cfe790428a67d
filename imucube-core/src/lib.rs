//! IMU Cube Core Library - Shared geometry, projection and rendering logic
//!
//! This library provides the core of the attitude viewer: rotating the
//! constant cube by the current orientation, projecting it to the screen and
//! drawing its faces back-to-front. It also defines the angle-source and
//! render-surface seams the host environment plugs into.

pub mod config;
pub mod depth;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod projection;
pub mod reading;
pub mod render;
pub mod source;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use config::ViewerConfig;
pub use error::{ConfigError, ReadingError, SourceError, SurfaceError};
pub use frame::{FrameDriver, FrameReport, SimulationState};
pub use geometry::{Cube, Face, Rgb};
pub use projection::{Projector, ScreenPoint};
pub use reading::{parse_line, parse_reading, LineBuffer};
pub use render::{render_cube, RenderStats, RenderStyle};
pub use source::{AngleSource, ScriptedSource, SweepSource};
pub use surface::{Canvas, DrawCommand, RecordingSurface, RenderSurface, TextItem};
pub use transform::{Orientation, Transform};

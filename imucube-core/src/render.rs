//! Depth-sorted cube rendering
use nalgebra::Point3;
use tracing::trace;

use crate::config::ViewerConfig;
use crate::depth::draw_order;
use crate::geometry::{Cube, Rgb, FACE_COUNT, VERTEX_COUNT};
use crate::projection::Projector;
use crate::surface::RenderSurface;

/// Outline settings applied to every face
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub outline: Rgb,
    pub outline_width: u32,
}

impl RenderStyle {
    pub fn from_config(config: &ViewerConfig) -> Self {
        Self {
            outline: config.outline,
            outline_width: config.outline_width,
        }
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            outline: Rgb::BLACK,
            outline_width: 2,
        }
    }
}

/// What happened to the faces of one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub drawn: usize,
    pub skipped: usize,
    /// Face indices in the order they were considered
    pub order: [usize; FACE_COUNT],
}

/// Draw the cube back-to-front: each face filled with its color, then
/// outlined. Faces with a degenerate projection are skipped for this frame.
pub fn render_cube<S: RenderSurface + ?Sized>(
    surface: &mut S,
    cube: &Cube,
    transformed: &[Point3<f32>; VERTEX_COUNT],
    projector: &Projector,
    style: &RenderStyle,
) -> RenderStats {
    let order = draw_order(transformed, cube.faces());
    let mut stats = RenderStats {
        order,
        ..Default::default()
    };

    for &i in &order {
        let face = &cube.faces()[i];
        let Some(points) = projector.project_face(transformed, &face.indices) else {
            trace!(face = i, "Skipping face with degenerate projection");
            stats.skipped += 1;
            continue;
        };
        surface.fill_polygon(&points, face.color);
        if style.outline_width > 0 {
            surface.stroke_polygon(&points, style.outline, style.outline_width);
        }
        stats.drawn += 1;
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DEFAULT_FACE_COLORS;
    use crate::surface::{DrawCommand, RecordingSurface};
    use crate::transform::{transform_vertices, Orientation};

    #[test]
    fn test_identity_frame_draws_all_faces_back_to_front() {
        let cube = Cube::new();
        let verts = transform_vertices(cube.vertices(), &Orientation::zero());
        let mut surface = RecordingSurface::new(800, 600);
        let stats = render_cube(
            &mut surface,
            &cube,
            &verts,
            &Projector::default(),
            &RenderStyle::default(),
        );

        assert_eq!(stats.drawn, 6);
        assert_eq!(stats.skipped, 0);
        let expected: Vec<_> = [5, 0, 1, 2, 3, 4]
            .iter()
            .map(|&i| DEFAULT_FACE_COLORS[i])
            .collect();
        assert_eq!(surface.fill_colors(), expected);
    }

    #[test]
    fn test_each_fill_is_followed_by_outline() {
        let cube = Cube::new();
        let verts = transform_vertices(cube.vertices(), &Orientation::new(0.2, 0.4, 0.6));
        let mut surface = RecordingSurface::new(800, 600);
        render_cube(
            &mut surface,
            &cube,
            &verts,
            &Projector::default(),
            &RenderStyle::default(),
        );

        let commands = surface.commands();
        assert_eq!(commands.len(), 12);
        for pair in commands.chunks(2) {
            match (&pair[0], &pair[1]) {
                (
                    DrawCommand::Fill { points: fill, .. },
                    DrawCommand::Stroke {
                        points: stroke,
                        color,
                        thickness,
                    },
                ) => {
                    assert_eq!(fill, stroke);
                    assert_eq!(*color, Rgb::BLACK);
                    assert_eq!(*thickness, 2);
                }
                other => panic!("unexpected command pair {:?}", other),
            }
        }
    }

    #[test]
    fn test_degenerate_faces_are_skipped() {
        let cube = Cube::new();
        let verts = transform_vertices(cube.vertices(), &Orientation::zero());
        // Camera plane at z = -1 collapses the near face
        let projector = Projector::new(200.0, 1.0, 800, 600);
        let mut surface = RecordingSurface::new(800, 600);
        let stats = render_cube(&mut surface, &cube, &verts, &projector, &RenderStyle::default());

        assert_eq!(stats.skipped, 5);
        assert_eq!(stats.drawn, 1);
        assert_eq!(surface.fill_colors(), vec![DEFAULT_FACE_COLORS[5]]);
    }
}

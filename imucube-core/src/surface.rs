//! Render surface seam and a software raster implementing it
use crate::error::SurfaceError;
use crate::geometry::Rgb;
use crate::projection::ScreenPoint;

/// A drawable 2D raster of fixed size.
///
/// The frame driver clears it, draws the cube and HUD, then presents it once
/// per frame.
pub trait RenderSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn clear(&mut self, color: Rgb);
    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Rgb);
    fn stroke_polygon(&mut self, points: &[ScreenPoint], color: Rgb, thickness: u32);
    fn draw_text(&mut self, at: ScreenPoint, text: &str, color: Rgb);
    fn present(&mut self) -> Result<(), SurfaceError>;
}

/// Text queued on a canvas, drawn by whatever presents the canvas
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub at: ScreenPoint,
    pub text: String,
    pub color: Rgb,
}

/// In-memory RGB framebuffer with polygon rasterization
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
    texts: Vec<TextItem>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb::BLACK; width as usize * height as usize],
            texts: Vec::new(),
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn texts(&self) -> &[TextItem] {
        &self.texts
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    fn set(&mut self, x: i32, y: i32, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    fn fill_span(&mut self, y: i32, x0: i32, x1: i32, color: Rgb) {
        let x0 = x0.max(0);
        let x1 = x1.min(self.width as i32 - 1);
        if x0 > x1 {
            return;
        }
        let row = y as usize * self.width as usize;
        self.pixels[row + x0 as usize..=row + x1 as usize].fill(color);
    }

    /// Square brush centered on `(x, y)`
    fn stamp(&mut self, x: i32, y: i32, thickness: u32, color: Rgb) {
        let t = thickness.max(1) as i32;
        let lo = -(t / 2);
        for dy in lo..lo + t {
            for dx in lo..lo + t {
                self.set(x + dx, y + dy, color);
            }
        }
    }

    fn draw_line(&mut self, a: ScreenPoint, b: ScreenPoint, thickness: u32, color: Rgb) {
        let margin = thickness as f64;
        let Some((a, b)) = clip_segment(
            a,
            b,
            -margin,
            -margin,
            self.width as f64 + margin,
            self.height as f64 + margin,
        ) else {
            return;
        };

        // Bresenham
        let (mut x, mut y) = (a.x, a.y);
        let dx = (b.x - a.x).abs();
        let dy = -(b.y - a.y).abs();
        let sx = if a.x < b.x { 1 } else { -1 };
        let sy = if a.y < b.y { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.stamp(x, y, thickness, color);
            if x == b.x && y == b.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}

impl RenderSurface for Canvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
        self.texts.clear();
    }

    /// Even-odd scanline fill sampled at pixel centers
    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Rgb) {
        if points.len() < 3 || self.width == 0 || self.height == 0 {
            return;
        }

        let min_y = points.iter().map(|p| p.y).min().unwrap_or(0).max(0);
        let max_y = points
            .iter()
            .map(|p| p.y)
            .max()
            .unwrap_or(0)
            .min(self.height as i32 - 1);

        let right = self.width as f64;
        let mut crossings: Vec<f64> = Vec::with_capacity(points.len());
        for y in min_y..=max_y {
            let yc = y as f64 + 0.5;
            crossings.clear();
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                let (ay, by) = (a.y as f64, b.y as f64);
                if (ay <= yc && yc < by) || (by <= yc && yc < ay) {
                    let t = (yc - ay) / (by - ay);
                    crossings.push(a.x as f64 + t * (b.x - a.x) as f64);
                }
            }
            crossings.sort_by(f64::total_cmp);
            for pair in crossings.chunks_exact(2) {
                let x0 = (pair[0] - 0.5).ceil();
                let x1 = (pair[1] - 0.5).ceil() - 1.0;
                if x1 >= x0 {
                    let x0 = x0.clamp(-1.0, right) as i32;
                    let x1 = x1.clamp(-1.0, right) as i32;
                    self.fill_span(y, x0, x1, color);
                }
            }
        }
    }

    fn stroke_polygon(&mut self, points: &[ScreenPoint], color: Rgb, thickness: u32) {
        if points.len() < 2 {
            return;
        }
        for (i, &a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            self.draw_line(a, b, thickness, color);
        }
    }

    fn draw_text(&mut self, at: ScreenPoint, text: &str, color: Rgb) {
        self.texts.push(TextItem {
            at,
            text: text.to_string(),
            color,
        });
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        Ok(())
    }
}

/// Liang-Barsky clip of segment `a..b` against a rectangle
fn clip_segment(
    a: ScreenPoint,
    b: ScreenPoint,
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
) -> Option<(ScreenPoint, ScreenPoint)> {
    let (x0, y0) = (a.x as f64, a.y as f64);
    let (dx, dy) = (b.x as f64 - x0, b.y as f64 - y0);
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;

    for (p, q) in [
        (-dx, x0 - xmin),
        (dx, xmax - x0),
        (-dy, y0 - ymin),
        (dy, ymax - y0),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| ScreenPoint::new((x0 + t * dx).round() as i32, (y0 + t * dy).round() as i32);
    Some((at(t0), at(t1)))
}

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgb),
    Fill {
        points: Vec<ScreenPoint>,
        color: Rgb,
    },
    Stroke {
        points: Vec<ScreenPoint>,
        color: Rgb,
        thickness: u32,
    },
    Text {
        at: ScreenPoint,
        text: String,
        color: Rgb,
    },
    Present,
}

/// Surface that records calls instead of drawing them
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Fill colors in draw order
    pub fn fill_colors(&self) -> Vec<Rgb> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Fill { color, .. } => Some(*color),
                _ => None,
            })
            .collect()
    }

    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl RenderSurface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Rgb) {
        self.commands.push(DrawCommand::Fill {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_polygon(&mut self, points: &[ScreenPoint], color: Rgb, thickness: u32) {
        self.commands.push(DrawCommand::Stroke {
            points: points.to_vec(),
            color,
            thickness,
        });
    }

    fn draw_text(&mut self, at: ScreenPoint, text: &str, color: Rgb) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            color,
        });
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        self.commands.push(DrawCommand::Present);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: i32, y0: i32, x1: i32, y1: i32) -> [ScreenPoint; 4] {
        [
            ScreenPoint::new(x0, y0),
            ScreenPoint::new(x1, y0),
            ScreenPoint::new(x1, y1),
            ScreenPoint::new(x0, y1),
        ]
    }

    #[test]
    fn test_clear_fills_every_pixel() {
        let mut canvas = Canvas::new(4, 3);
        canvas.clear(Rgb(10, 10, 30));
        assert!(canvas.pixels().iter().all(|&p| p == Rgb(10, 10, 30)));
    }

    #[test]
    fn test_fill_square_covers_interior() {
        let mut canvas = Canvas::new(10, 10);
        canvas.clear(Rgb::BLACK);
        canvas.fill_polygon(&square(2, 2, 6, 6), Rgb::WHITE);
        assert_eq!(canvas.pixel(2, 2), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(5, 5), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(6, 6), Some(Rgb::BLACK));
        assert_eq!(canvas.pixel(1, 3), Some(Rgb::BLACK));
        let lit = canvas.pixels().iter().filter(|&&p| p == Rgb::WHITE).count();
        assert_eq!(lit, 16);
    }

    #[test]
    fn test_fill_clips_to_bounds() {
        let mut canvas = Canvas::new(8, 8);
        canvas.clear(Rgb::BLACK);
        canvas.fill_polygon(&square(-100, -100, 100, 100), Rgb::WHITE);
        assert!(canvas.pixels().iter().all(|&p| p == Rgb::WHITE));
    }

    #[test]
    fn test_stroke_draws_outline_only() {
        let mut canvas = Canvas::new(20, 20);
        canvas.clear(Rgb::BLACK);
        canvas.stroke_polygon(&square(4, 4, 14, 14), Rgb::WHITE, 1);
        assert_eq!(canvas.pixel(4, 4), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(9, 4), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(14, 9), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(9, 9), Some(Rgb::BLACK));
    }

    #[test]
    fn test_thick_stroke_is_wider() {
        let mut canvas = Canvas::new(20, 20);
        canvas.clear(Rgb::BLACK);
        canvas.stroke_polygon(&square(4, 4, 14, 14), Rgb::WHITE, 2);
        // Two pixels across the top edge
        assert_eq!(canvas.pixel(9, 3), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(9, 4), Some(Rgb::WHITE));
        assert_eq!(canvas.pixel(9, 5), Some(Rgb::BLACK));
    }

    #[test]
    fn test_offscreen_line_is_clipped() {
        let mut canvas = Canvas::new(10, 10);
        canvas.clear(Rgb::BLACK);
        let far = ScreenPoint::new(1 << 24, 5);
        canvas.stroke_polygon(&[ScreenPoint::new(0, 5), far], Rgb::WHITE, 1);
        assert_eq!(canvas.pixel(9, 5), Some(Rgb::WHITE));
        assert!(clip_segment(
            ScreenPoint::new(-50, -50),
            ScreenPoint::new(-40, -60),
            0.0,
            0.0,
            10.0,
            10.0
        )
        .is_none());
    }

    #[test]
    fn test_text_is_queued_and_cleared() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_text(ScreenPoint::new(1, 1), "hi", Rgb::WHITE);
        assert_eq!(canvas.texts().len(), 1);
        canvas.clear(Rgb::BLACK);
        assert!(canvas.texts().is_empty());
    }

    #[test]
    fn test_recording_surface_logs_calls() {
        let mut surface = RecordingSurface::new(800, 600);
        surface.clear(Rgb::BLACK);
        surface.fill_polygon(&square(0, 0, 1, 1), Rgb::WHITE);
        surface.present().unwrap();
        assert_eq!(surface.fill_colors(), vec![Rgb::WHITE]);
        assert_eq!(surface.commands().last(), Some(&DrawCommand::Present));
        assert_eq!(surface.take_commands().len(), 3);
        assert!(surface.commands().is_empty());
    }
}

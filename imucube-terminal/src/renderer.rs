//! Terminal presentation of the software canvas
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use imucube_core::{Canvas, RenderSurface, Rgb, ScreenPoint, SurfaceError};
use std::io::Write;

/// Character luminosity ramp for ASCII output (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Upper half block: foreground paints the top pixel, background the bottom
const HALF_BLOCK: char = '\u{2580}';

/// How canvas pixels become terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresentMode {
    /// Two true-color pixels per cell
    #[default]
    HalfBlock,
    /// One luminosity character per cell, coarse color
    Ascii,
}

fn to_color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

/// Map a luminance in `[0, 1]` onto the ramp
fn ramp_char(luminance: f32) -> char {
    let index = (luminance.clamp(0.0, 1.0) * (LUMINOSITY_RAMP.len() - 1) as f32).round() as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}

/// Coarse terminal color for a ramp character
fn ramp_color(c: char) -> Color {
    match c {
        ' ' | '.' | ':' => Color::DarkGrey,
        '-' | '=' => Color::Grey,
        '+' | '*' => Color::White,
        '#' | '%' | '@' => Color::Cyan,
        _ => Color::White,
    }
}

/// A [`Canvas`] that presents itself to a terminal-like writer.
///
/// Drawing happens at full canvas resolution; `present` resamples the canvas
/// to the current cell grid and writes it, then the HUD text and status line.
pub struct TerminalSurface<W: Write> {
    canvas: Canvas,
    cols: u16,
    rows: u16,
    mode: PresentMode,
    status: Option<String>,
    out: W,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(width: u32, height: u32, cols: u16, rows: u16, mode: PresentMode, out: W) -> Self {
        Self {
            canvas: Canvas::new(width, height),
            cols,
            rows,
            mode,
            status: None,
            out,
        }
    }

    /// Follow a terminal resize
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    /// Text for the bottom row on the next present
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = Some(status.into());
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    /// Canvas pixel under virtual pixel `(vx, vy)` of a `vw` x `vh` grid
    fn sample(&self, vx: u32, vy: u32, vw: u32, vh: u32) -> Rgb {
        let x = (vx as u64 * self.canvas.width() as u64 / vw.max(1) as u64) as i32;
        let y = (vy as u64 * self.canvas.height() as u64 / vh.max(1) as u64) as i32;
        self.canvas.pixel(x, y).unwrap_or(Rgb::BLACK)
    }

    /// Cell position for a canvas pixel position
    fn cell_for(&self, at: ScreenPoint) -> (u16, u16) {
        let col = at.x.max(0) as u64 * self.cols as u64 / self.canvas.width().max(1) as u64;
        let row = at.y.max(0) as u64 * self.rows as u64 / self.canvas.height().max(1) as u64;
        (
            col.min(self.cols.saturating_sub(1) as u64) as u16,
            row.min(self.rows.saturating_sub(1) as u64) as u16,
        )
    }

    fn write_half_blocks(&mut self) -> std::io::Result<()> {
        let (vw, vh) = (self.cols as u32, self.rows as u32 * 2);
        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            let mut last: Option<(Rgb, Rgb)> = None;
            for col in 0..self.cols {
                let top = self.sample(col as u32, row as u32 * 2, vw, vh);
                let bottom = self.sample(col as u32, row as u32 * 2 + 1, vw, vh);
                if last != Some((top, bottom)) {
                    self.out
                        .queue(SetForegroundColor(to_color(top)))?
                        .queue(SetBackgroundColor(to_color(bottom)))?;
                    last = Some((top, bottom));
                }
                self.out.queue(Print(HALF_BLOCK))?;
            }
            self.out.queue(ResetColor)?;
        }
        Ok(())
    }

    fn write_ascii(&mut self) -> std::io::Result<()> {
        let (vw, vh) = (self.cols as u32, self.rows as u32);
        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            for col in 0..self.cols {
                let c = ramp_char(self.sample(col as u32, row as u32, vw, vh).luminance());
                self.out.queue(SetForegroundColor(ramp_color(c)))?.queue(Print(c))?;
            }
        }
        self.out.queue(ResetColor)?;
        Ok(())
    }

    fn write_overlay(&mut self) -> std::io::Result<()> {
        let texts: Vec<_> = self.canvas.texts().to_vec();
        for item in texts {
            let (col, row) = self.cell_for(item.at);
            self.out
                .queue(cursor::MoveTo(col, row))?
                .queue(SetForegroundColor(to_color(item.color)))?
                .queue(Print(item.text))?
                .queue(ResetColor)?;
        }
        if let Some(status) = &self.status {
            self.out
                .queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?
                .queue(SetForegroundColor(Color::Yellow))?
                .queue(Print(status))?
                .queue(ResetColor)?;
        }
        Ok(())
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn width(&self) -> u32 {
        self.canvas.width()
    }

    fn height(&self) -> u32 {
        self.canvas.height()
    }

    fn clear(&mut self, color: Rgb) {
        self.canvas.clear(color);
    }

    fn fill_polygon(&mut self, points: &[ScreenPoint], color: Rgb) {
        self.canvas.fill_polygon(points, color);
    }

    fn stroke_polygon(&mut self, points: &[ScreenPoint], color: Rgb, thickness: u32) {
        self.canvas.stroke_polygon(points, color, thickness);
    }

    fn draw_text(&mut self, at: ScreenPoint, text: &str, color: Rgb) {
        self.canvas.draw_text(at, text, color);
    }

    fn present(&mut self) -> Result<(), SurfaceError> {
        match self.mode {
            PresentMode::HalfBlock => self.write_half_blocks()?,
            PresentMode::Ascii => self.write_ascii()?,
        }
        self.write_overlay()?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(surface: &TerminalSurface<Vec<u8>>) -> String {
        String::from_utf8_lossy(surface.writer()).into_owned()
    }

    #[test]
    fn test_ramp_bounds() {
        assert_eq!(ramp_char(0.0), ' ');
        assert_eq!(ramp_char(1.0), '@');
        assert_eq!(ramp_char(7.0), '@');
    }

    #[test]
    fn test_half_block_fills_every_cell() {
        let mut surface = TerminalSurface::new(80, 40, 8, 4, PresentMode::HalfBlock, Vec::new());
        surface.clear(Rgb(10, 10, 30));
        surface.present().unwrap();
        let out = output(&surface);
        assert_eq!(out.chars().filter(|&c| c == HALF_BLOCK).count(), 32);
    }

    #[test]
    fn test_ascii_mode_uses_ramp() {
        let mut surface = TerminalSurface::new(40, 20, 4, 2, PresentMode::Ascii, Vec::new());
        surface.clear(Rgb::WHITE);
        surface.present().unwrap();
        let out = output(&surface);
        assert_eq!(out.chars().filter(|&c| c == '@').count(), 8);
    }

    #[test]
    fn test_overlay_text_and_status_are_written() {
        let mut surface = TerminalSurface::new(800, 600, 80, 24, PresentMode::HalfBlock, Vec::new());
        surface.clear(Rgb::BLACK);
        surface.draw_text(ScreenPoint::new(20, 20), "Roll: 1.0°", Rgb::WHITE);
        surface.set_status("FPS: 60.0");
        surface.present().unwrap();
        let out = output(&surface);
        assert!(out.contains("Roll: 1.0°"));
        assert!(out.contains("FPS: 60.0"));
    }

    #[test]
    fn test_cell_mapping_scales_and_clamps() {
        let surface = TerminalSurface::new(800, 600, 80, 24, PresentMode::Ascii, Vec::new());
        assert_eq!(surface.cell_for(ScreenPoint::new(20, 20)), (2, 0));
        assert_eq!(surface.cell_for(ScreenPoint::new(400, 300)), (40, 12));
        assert_eq!(surface.cell_for(ScreenPoint::new(5000, -5)), (79, 0));
    }

    #[test]
    fn test_sample_reads_canvas() {
        let mut surface = TerminalSurface::new(10, 10, 10, 5, PresentMode::HalfBlock, Vec::new());
        surface.clear(Rgb::BLACK);
        let square = [
            ScreenPoint::new(0, 0),
            ScreenPoint::new(5, 0),
            ScreenPoint::new(5, 5),
            ScreenPoint::new(0, 5),
        ];
        surface.fill_polygon(&square, Rgb::WHITE);
        assert_eq!(surface.sample(0, 0, 10, 10), Rgb::WHITE);
        assert_eq!(surface.sample(9, 9, 10, 10), Rgb::BLACK);
    }
}

//! Terminal host for the attitude viewer
use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{self},
};
use imucube_core::{AngleSource, FrameDriver, ViewerConfig};
use std::io::{self, stdout, Stdout};
use std::time::{Duration, Instant};
use tracing::{debug, info};

pub mod config;
pub mod renderer;
pub mod serial;

pub use config::{AppConfig, SerialConfig};
pub use renderer::{PresentMode, TerminalSurface};
pub use serial::{SerialAngleSource, StreamSource};

/// Frame pacing and FPS measurement
#[derive(Debug)]
pub struct FrameClock {
    target_frame_time: Duration,
    last_sample: Instant,
    frame_count: u32,
    fps: f32,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        Self {
            target_frame_time: Duration::from_secs(1) / target_fps.max(1),
            last_sample: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        }
    }

    pub fn target_frame_time(&self) -> Duration {
        self.target_frame_time
    }

    /// Sleep still owed for a frame that took `elapsed`
    pub fn remaining(&self, elapsed: Duration) -> Option<Duration> {
        self.target_frame_time
            .checked_sub(elapsed)
            .filter(|d| !d.is_zero())
    }

    /// Count a finished frame; refreshes the FPS figure about once a second
    pub fn record_frame(&mut self, now: Instant) -> Option<f32> {
        self.frame_count += 1;
        let window = now.saturating_duration_since(self.last_sample);
        if window.as_secs() >= 1 {
            self.fps = self.frame_count as f32 / window.as_secs_f32();
            self.frame_count = 0;
            self.last_sample = now;
            return Some(self.fps);
        }
        None
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}

/// True for key presses that end the session
pub fn is_quit_key(key: &KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn enter_screen() -> Result<()> {
    terminal::enable_raw_mode()?;
    execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
    Ok(())
}

/// The loop's error if it failed, else the first failed cleanup step
fn first_error(result: Result<()>, cleanup: [io::Result<()>; 2]) -> Result<()> {
    result?;
    for step in cleanup {
        step?;
    }
    Ok(())
}

/// Main application struct for the terminal viewer
pub struct TerminalApp<S: AngleSource> {
    driver: FrameDriver<S>,
    surface: TerminalSurface<Stdout>,
    clock: FrameClock,
    running: bool,
}

impl<S: AngleSource> TerminalApp<S> {
    pub fn new(source: S, config: &ViewerConfig, mode: PresentMode) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;

        Ok(Self {
            driver: FrameDriver::new(source, config),
            surface: TerminalSurface::new(config.width, config.height, cols, rows, mode, stdout()),
            clock: FrameClock::new(config.target_fps),
            running: true,
        })
    }

    /// Run until the user quits. The angle source is released on the way
    /// out whether the loop ended normally or with an error.
    pub fn run(&mut self) -> Result<()> {
        let result = enter_screen().and_then(|()| {
            info!(source = %self.driver.source().name(), "Viewer started");
            self.main_loop()
        });

        // Cleanup: every step runs even if an earlier one failed
        self.driver.shutdown();
        let raw = terminal::disable_raw_mode();
        let screen = execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show);
        info!(frames = self.driver.state().frame, "Viewer stopped");

        first_error(result, [raw, screen])
    }

    fn main_loop(&mut self) -> Result<()> {
        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::ZERO)? {
                self.handle_event(event::read()?);
            }
            if !self.running {
                break;
            }

            // Render
            self.driver.step(&mut self.surface)?;

            // Frame timing
            if let Some(fps) = self.clock.record_frame(Instant::now()) {
                debug!(fps, "Frame rate");
                self.surface.set_status(format!(
                    "{} | FPS: {:.1} | Q/Esc=Quit",
                    self.driver.source().name(),
                    fps
                ));
            }
            if let Some(wait) = self.clock.remaining(frame_start.elapsed()) {
                std::thread::sleep(wait);
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if is_quit_key(&key) => {
                self.running = false;
            }
            Event::Resize(cols, rows) => {
                self.surface.resize(cols, rows);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_frame_time() {
        let clock = FrameClock::new(60);
        assert_eq!(clock.target_frame_time(), Duration::from_secs(1) / 60);
        let clock = FrameClock::new(0);
        assert_eq!(clock.target_frame_time(), Duration::from_secs(1));
    }

    #[test]
    fn test_remaining_wait() {
        let clock = FrameClock::new(50);
        assert_eq!(
            clock.remaining(Duration::from_millis(5)),
            Some(Duration::from_millis(15))
        );
        assert_eq!(clock.remaining(Duration::from_millis(20)), None);
        assert_eq!(clock.remaining(Duration::from_millis(40)), None);
    }

    #[test]
    fn test_fps_sampled_each_second() {
        let mut clock = FrameClock::new(60);
        let start = clock.last_sample;
        for i in 1..30 {
            assert_eq!(clock.record_frame(start + Duration::from_millis(i * 10)), None);
        }
        let fps = clock.record_frame(start + Duration::from_secs(1)).unwrap();
        assert!((fps - 30.0).abs() < 1e-3);
        assert_eq!(clock.fps(), fps);
    }

    #[test]
    fn test_loop_error_wins_over_cleanup_errors() {
        let broken = || Err(io::Error::new(io::ErrorKind::Other, "tty gone"));

        let err = first_error(Err(anyhow::anyhow!("frame failed")), [broken(), Ok(())]).unwrap_err();
        assert_eq!(err.to_string(), "frame failed");

        let err = first_error(Ok(()), [Ok(()), broken()]).unwrap_err();
        assert_eq!(err.to_string(), "tty gone");

        assert!(first_error(Ok(()), [Ok(()), Ok(())]).is_ok());
    }

    #[test]
    fn test_quit_keys() {
        let press = |code, modifiers| KeyEvent::new(code, modifiers);
        assert!(is_quit_key(&press(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_quit_key(&press(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit_key(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit_key(&press(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit_key(&press(KeyCode::Char('w'), KeyModifiers::NONE)));

        let mut release = press(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert!(!is_quit_key(&release));
    }
}

//! Angle sources: where orientation readings come from
use std::collections::VecDeque;
use std::f32::consts::{PI, TAU};

use crate::reading::parse_line;
use crate::transform::Orientation;

/// Supplier of orientation readings.
///
/// `poll` is called once per frame and must not block: it returns the
/// newest complete reading since the previous poll, or `None` when nothing
/// new (or nothing valid) arrived.
pub trait AngleSource {
    fn poll(&mut self) -> Option<Orientation>;

    /// Release the underlying device. Further calls are no-ops.
    fn release(&mut self) {}

    /// Human-readable name for logs and the HUD
    fn name(&self) -> String {
        String::from("angle source")
    }
}

impl<S: AngleSource + ?Sized> AngleSource for Box<S> {
    fn poll(&mut self) -> Option<Orientation> {
        (**self).poll()
    }

    fn release(&mut self) {
        (**self).release()
    }

    fn name(&self) -> String {
        (**self).name()
    }
}

/// Replays wire-format lines, one entry per poll
#[derive(Debug, Default)]
pub struct ScriptedSource {
    script: VecDeque<Option<String>>,
    released: bool,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        Self {
            script: lines.into_iter().map(|l| Some(l.into())).collect(),
            released: false,
        }
    }

    /// Queue a line for a future poll
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.script.push_back(Some(line.into()));
    }

    /// Queue a poll that sees no data
    pub fn push_idle(&mut self) {
        self.script.push_back(None);
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }
}

impl AngleSource for ScriptedSource {
    fn poll(&mut self) -> Option<Orientation> {
        self.script.pop_front().flatten().as_deref().and_then(parse_line)
    }

    fn release(&mut self) {
        if !self.released {
            self.script.clear();
            self.released = true;
        }
    }

    fn name(&self) -> String {
        String::from("script")
    }
}

/// Synthetic slow tumble for running without a device
#[derive(Debug, Clone)]
pub struct SweepSource {
    current: Orientation,
    step: Orientation,
}

impl SweepSource {
    /// Step sizes are radians per poll
    pub fn new(step: Orientation) -> Self {
        Self {
            current: Orientation::zero(),
            step,
        }
    }
}

impl Default for SweepSource {
    fn default() -> Self {
        Self::new(Orientation::new(0.0, 0.01, 0.015))
    }
}

/// Wrap an angle into `[-PI, PI)`
fn wrap(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

impl AngleSource for SweepSource {
    fn poll(&mut self) -> Option<Orientation> {
        let s = self.step;
        self.current.rotate(s.roll, s.pitch, s.yaw);
        self.current = Orientation::new(
            wrap(self.current.roll),
            wrap(self.current.pitch),
            wrap(self.current.yaw),
        );
        Some(self.current)
    }

    fn name(&self) -> String {
        String::from("demo sweep")
    }
}

//! Fixed-step frame clock
//!
//! Hosts report wall-clock deltas; the clock answers how many simulation
//! ticks they are worth. Long stalls (tab hidden, debugger) are clamped so
//! the game doesn't fast-forward, and a single frame never runs more than
//! `max_substeps` ticks.

use crate::consts::MAX_SUBSTEPS;

/// Longest wall-clock delta honoured in one frame, in seconds
pub const MAX_FRAME_DT: f32 = 0.1;

/// Accumulator turning variable frame times into fixed ticks
#[derive(Debug, Clone)]
pub struct FrameClock {
    step: f32,
    accumulator: f32,
    max_substeps: u32,
    ticks: u64,
}

impl FrameClock {
    pub fn new(fps: f32) -> Self {
        Self {
            step: 1.0 / fps,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
            ticks: 0,
        }
    }

    /// Seconds per tick
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Ticks handed out so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Fraction of a tick left in the accumulator, for interpolation
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }

    /// Feed `dt` seconds of wall time; returns how many ticks to run now
    pub fn advance(&mut self, dt: f32) -> u32 {
        let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        if substeps == self.max_substeps && self.accumulator >= self.step {
            log::debug!("Frame clock behind by {:.3}s; dropping backlog", self.accumulator);
            self.accumulator %= self.step;
        }

        self.ticks += u64::from(substeps);
        substeps
    }

    /// Drop any partial tick (after a pause or focus change)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

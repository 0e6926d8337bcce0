//! Rendering interface
//!
//! The core never draws. Each frame it hands a [`FrameSnapshot`] to whatever
//! [`Renderer`] the host provides; [`shapes`] turns entities into outlines.

pub mod shapes;

use serde::Serialize;

use crate::settings::Settings;
use crate::sim::{Asteroid, GameState, Laser, Ship};
use shapes::Outlines;

/// Borrowed view of everything a frame needs to draw
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot<'a> {
    pub ship: &'a Ship,
    pub asteroids: &'a [Asteroid],
    pub lasers: &'a [Laser],
    pub score: u64,
    pub score_high: u64,
    pub text: &'a str,
    /// Banner is drawn only while this is non-negative
    pub text_alpha: f32,
    pub lives: u32,
    pub level: u32,
    pub ship_exploding: bool,
    /// Hull visible this frame (blink on, alive, not exploding)
    pub ship_visible: bool,
    /// Flame drawn behind the hull
    pub thruster_visible: bool,
    /// The last life icon turns red while the ship explodes
    pub last_life_red: bool,
    pub show_bounding: bool,
    pub show_center_dot: bool,
    pub outlines: Outlines,
    /// Gain for sound effects after the sound switch, 0..=1
    pub sfx_volume: f32,
    /// Gain for the beat after the music switch, 0..=1
    pub music_volume: f32,
}

impl<'a> FrameSnapshot<'a> {
    pub fn capture(state: &'a GameState, settings: &Settings) -> Self {
        let ship = &state.ship;
        let exploding = ship.is_exploding();
        Self {
            ship,
            asteroids: &state.asteroids,
            lasers: &ship.lasers,
            score: state.score,
            score_high: state.score_high,
            text: &state.text,
            text_alpha: state.text_alpha,
            lives: state.lives,
            level: state.level,
            ship_exploding: exploding,
            ship_visible: ship.is_visible(),
            thruster_visible: ship.thrusting && ship.is_visible(),
            last_life_red: exploding,
            show_bounding: settings.show_bounding,
            show_center_dot: settings.show_center_dot,
            outlines: Outlines::build(ship, &state.asteroids, state.lives),
            sfx_volume: settings.effective_sfx_volume(),
            music_volume: settings.effective_music_volume(),
        }
    }

    pub fn text_visible(&self) -> bool {
        self.text_alpha >= 0.0 && !self.text.is_empty()
    }
}

/// Something that can draw a frame
pub trait Renderer {
    fn draw(&mut self, frame: &FrameSnapshot<'_>);
}

/// Logs a one-line frame summary (headless runs)
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
    /// Log every n-th frame; 0 disables
    pub every: u64,
}

impl LogRenderer {
    pub fn new(every: u64) -> Self {
        Self { frames: 0, every }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &FrameSnapshot<'_>) {
        self.frames += 1;
        if self.every == 0 || self.frames % self.every != 0 {
            return;
        }
        log::debug!(
            "frame {}: level {} score {} (top {}) lives {} roids {} lasers {}{}",
            self.frames,
            frame.level + 1,
            frame.score,
            frame.score_high,
            frame.lives,
            frame.asteroids.len(),
            frame.lasers.len(),
            if frame.ship_exploding { " [boom]" } else { "" }
        );
    }
}

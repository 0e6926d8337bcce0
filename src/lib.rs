//! Roid Belt - A fixed-timestep asteroid field arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ship, lasers, asteroid belt, collisions)
//! - `renderer`: Frame snapshots and outline geometry for host renderers
//! - `audio`: Sound cue routing and the tempo-driven music beat
//! - `platform`: Input intents and fixed-step frame clock for host loops
//! - `persistence`: Key/value storage backends
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{Error, Result};
pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation frame rate (frames per second)
    pub const FPS: f32 = 30.0;
    /// Maximum ticks per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Playfield dimensions in pixels
    pub const FIELD_WIDTH: f32 = 760.0;
    pub const FIELD_HEIGHT: f32 = 570.0;

    /// Storage key for the persisted high score
    pub const SAVE_KEY_SCORE: &str = "highscore";
    /// Storage key for player settings
    pub const SAVE_KEY_SETTINGS: &str = "roid_belt_settings";

    /// Rejection-sampling budget when placing a new asteroid away from the ship
    pub const MAX_SPAWN_ATTEMPTS: u32 = 1000;
}

/// Euclidean distance between two points
#[inline]
pub fn dist_between_points(a: Vec2, b: Vec2) -> f32 {
    (b - a).length()
}

/// Wrap one coordinate around a field edge, allowing `margin` of overhang.
///
/// Leaving past `-margin` re-enters at `extent + margin` and vice versa.
/// Used by the ship (margin = ship radius) and asteroids (margin = own radius).
#[inline]
pub fn wrap_with_margin(value: f32, extent: f32, margin: f32) -> f32 {
    if value < -margin {
        extent + margin
    } else if value >= extent + margin {
        -margin
    } else {
        value
    }
}

/// Wrap one coordinate with zero margin (lasers)
#[inline]
pub fn wrap_zero_margin(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        extent
    } else if value > extent {
        0.0
    } else {
        value
    }
}

/// Frames needed to cover `seconds` at `fps`, rounded up
#[inline]
pub fn frames_for(seconds: f32, fps: f32) -> u32 {
    (seconds * fps).ceil().max(0.0) as u32
}

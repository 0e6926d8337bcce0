//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Defaults match the classic
//! arcade feel; a JSON file can override any subset of fields.

use serde::{Deserialize, Serialize};

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH, FPS};
use crate::error::{Error, Result};
use crate::frames_for;

/// Gameplay constants. Durations are seconds, speeds are pixels per second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Simulation frames per second
    pub fps: f32,
    /// Friction coefficient of space (0 = none, 1 = max)
    pub friction: f32,
    /// Starting lives
    pub game_lives: u32,
    /// Max laser travel as a fraction of field width
    pub laser_dist: f32,
    /// Duration of a laser's hit explosion
    pub laser_explode_dur: f32,
    /// Max lasers on screen at once
    pub laser_max: usize,
    pub laser_speed: f32,
    /// Asteroid outline jaggedness (0 = none, 1 = lots)
    pub roid_jag: f32,
    pub roid_pts_large: u64,
    pub roid_pts_medium: u64,
    pub roid_pts_small: u64,
    /// Large asteroids in the first level
    pub roid_num: u32,
    /// Base asteroid size in pixels; the large tier is half of this
    pub roid_size: f32,
    /// Max starting asteroid speed
    pub roid_speed: f32,
    /// Average vertex count of an asteroid outline
    pub roid_vert: u32,
    /// Ship height in pixels
    pub ship_size: f32,
    /// Length of one blink toggle while invincible
    pub ship_blink_dur: f32,
    pub ship_explode_dur: f32,
    /// Invincibility after (re)spawn
    pub ship_inv_dur: f32,
    /// Ship acceleration
    pub ship_thrust: f32,
    /// Turn speed in degrees per second
    pub turn_speed: f32,
    /// Banner text fade time
    pub text_fade_time: f32,
    pub field_width: f32,
    pub field_height: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fps: FPS,
            friction: 0.7,
            game_lives: 3,
            laser_dist: 0.6,
            laser_explode_dur: 0.1,
            laser_max: 10,
            laser_speed: 500.0,
            roid_jag: 0.25,
            roid_pts_large: 20,
            roid_pts_medium: 50,
            roid_pts_small: 100,
            roid_num: 1,
            roid_size: 100.0,
            roid_speed: 50.0,
            roid_vert: 10,
            ship_size: 30.0,
            ship_blink_dur: 0.1,
            ship_explode_dur: 0.3,
            ship_inv_dur: 3.0,
            ship_thrust: 5.0,
            turn_speed: 360.0,
            text_fade_time: 2.5,
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&contents)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would stall or divide the simulation by zero
    pub fn validate(&self) -> Result<()> {
        let positive: [(&'static str, f32); 7] = [
            ("fps", self.fps),
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("roid_size", self.roid_size),
            ("ship_size", self.ship_size),
            ("ship_blink_dur", self.ship_blink_dur),
            ("text_fade_time", self.text_fade_time),
        ];
        for (name, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(Error::InvalidTuning {
                    name,
                    value,
                    expected: "(0, ∞)",
                });
            }
        }
        if !(0.0..1.0).contains(&self.roid_jag) {
            return Err(Error::InvalidTuning {
                name: "roid_jag",
                value: self.roid_jag,
                expected: "[0, 1)",
            });
        }
        if self.game_lives == 0 {
            return Err(Error::InvalidTuning {
                name: "game_lives",
                value: 0.0,
                expected: "[1, ∞)",
            });
        }
        Ok(())
    }

    /// Ship rotation per frame in radians
    pub fn turn_rate(&self) -> f32 {
        self.turn_speed.to_radians() / self.fps
    }

    /// Frames between blink toggles
    pub fn blink_frames(&self) -> u32 {
        frames_for(self.ship_blink_dur, self.fps)
    }

    /// Number of blink toggles covering the invincibility window
    pub fn invincible_blinks(&self) -> u32 {
        (self.ship_inv_dur / self.ship_blink_dur).ceil() as u32
    }

    pub fn ship_explode_frames(&self) -> u32 {
        frames_for(self.ship_explode_dur, self.fps)
    }

    pub fn laser_explode_frames(&self) -> u32 {
        frames_for(self.laser_explode_dur, self.fps)
    }

    /// Distance a laser may travel before it fizzles out
    pub fn laser_range(&self) -> f32 {
        self.laser_dist * self.field_width
    }

    /// Banner alpha lost per frame
    pub fn text_fade_step(&self) -> f32 {
        1.0 / self.text_fade_time / self.fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.blink_frames(), 3);
        assert_eq!(tuning.invincible_blinks(), 30);
        assert_eq!(tuning.ship_explode_frames(), 9);
        assert!((tuning.laser_range() - 456.0).abs() < 1e-3);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "game_lives": 5, "laser_max": 4 }"#).unwrap();
        assert_eq!(tuning.game_lives, 5);
        assert_eq!(tuning.laser_max, 4);
        assert_eq!(tuning.roid_size, 100.0);
    }

    #[test]
    fn test_rejects_zero_fps() {
        let err = Tuning::from_json(r#"{ "fps": 0.0 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidTuning { name: "fps", .. }));
    }

    #[test]
    fn test_rejects_bad_jag() {
        let tuning = Tuning {
            roid_jag: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(Error::InvalidTuning { name: "roid_jag", .. })
        ));
    }

    #[test]
    fn test_turn_rate() {
        let tuning = Tuning::default();
        let expected = std::f32::consts::TAU / 30.0;
        assert!((tuning.turn_rate() - expected).abs() < 1e-6);
    }
}

//! Player settings and preferences
//!
//! Persisted as a JSON blob next to the high score.

use serde::{Deserialize, Serialize};

use crate::consts::SAVE_KEY_SETTINGS;
use crate::persistence::KeyValueStore;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Sound effects (laser, hit, explosion, thrust)
    pub sound_on: bool,
    /// Background beat
    pub music_on: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Debug overlays ===
    /// Draw collision circles
    pub show_bounding: bool,
    /// Draw the ship's centre point
    pub show_center_dot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_on: true,
            music_on: true,
            master_volume: 0.8,
            sfx_volume: 0.5,
            music_volume: 1.0,
            show_bounding: false,
            show_center_dot: false,
        }
    }
}

impl Settings {
    pub fn toggle_music(&mut self) {
        self.music_on = !self.music_on;
        log::info!("Music {}", if self.music_on { "on" } else { "off" });
    }

    pub fn toggle_sound(&mut self) {
        self.sound_on = !self.sound_on;
        log::info!("Sound {}", if self.sound_on { "on" } else { "off" });
    }

    /// Effective sound effect volume (0 when sound is off)
    pub fn effective_sfx_volume(&self) -> f32 {
        if self.sound_on {
            (self.master_volume * self.sfx_volume).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Effective music volume (0 when music is off)
    pub fn effective_music_volume(&self) -> f32 {
        if self.music_on {
            (self.master_volume * self.music_volume).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(SAVE_KEY_SETTINGS) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Err(e) => log::warn!("Ignoring unreadable settings: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Failed to read settings: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings; failures are logged, never fatal
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to encode settings: {}", e);
                return;
            }
        };
        match store.set(SAVE_KEY_SETTINGS, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Settings not saved: {}", e),
        }
    }
}

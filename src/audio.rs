//! Audio cue routing and the background beat
//!
//! The simulation never plays sound itself. It reports [`GameEvent`]s each
//! tick; an [`AudioRouter`] turns them into calls on a host-provided
//! [`AudioCues`] implementation, honouring the sound/music switches.
//!
//! The beat tempo is gameplay-driven, so [`MusicBeat`] lives in the game state
//! and advances with the simulation.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Which of the two alternating beat samples to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeatNote {
    Low,
    High,
}

/// Slowest beat interval in seconds (full belt)
pub const BEAT_TEMPO_MAX: f32 = 1.0;
/// How much the interval shrinks as the belt empties
pub const BEAT_TEMPO_RANGE: f32 = 0.75;

/// Tempo-driven two-note beat.
///
/// The interval between beats is `1.0 - 0.75 * (1 - ratio)` seconds, where
/// `ratio` is the fraction of the level's asteroids still alive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicBeat {
    /// Next beat is the low note
    low: bool,
    /// Seconds per beat
    tempo: f32,
    /// Frames left until the next beat
    beat_time: u32,
}

impl Default for MusicBeat {
    fn default() -> Self {
        Self::new()
    }
}

impl MusicBeat {
    pub fn new() -> Self {
        Self {
            low: true,
            tempo: BEAT_TEMPO_MAX,
            beat_time: 0,
        }
    }

    /// Update tempo from the remaining-asteroid ratio (clamped to [0, 1])
    pub fn set_asteroid_ratio(&mut self, ratio: f32) {
        let ratio = ratio.clamp(0.0, 1.0);
        self.tempo = BEAT_TEMPO_MAX - BEAT_TEMPO_RANGE * (1.0 - ratio);
    }

    /// Seconds between beats
    pub fn tempo(&self) -> f32 {
        self.tempo
    }

    /// Advance one frame; returns the note to play when a beat is due
    pub fn tick(&mut self, fps: f32) -> Option<BeatNote> {
        if self.beat_time == 0 {
            let note = if self.low { BeatNote::Low } else { BeatNote::High };
            self.low = !self.low;
            self.beat_time = crate::frames_for(self.tempo, fps);
            Some(note)
        } else {
            self.beat_time -= 1;
            None
        }
    }
}

/// Sound output provided by the host
pub trait AudioCues {
    fn play_laser(&mut self);
    fn play_explosion(&mut self);
    fn play_hit(&mut self);
    fn play_thrust_loop(&mut self);
    fn stop_thrust_loop(&mut self);
    fn play_beat(&mut self, note: BeatNote);
}

/// Silent output
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCues;

impl AudioCues for NullCues {
    fn play_laser(&mut self) {}
    fn play_explosion(&mut self) {}
    fn play_hit(&mut self) {}
    fn play_thrust_loop(&mut self) {}
    fn stop_thrust_loop(&mut self) {}
    fn play_beat(&mut self, _note: BeatNote) {}
}

/// Writes every cue to the log (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct LogCues;

impl AudioCues for LogCues {
    fn play_laser(&mut self) {
        log::trace!("sfx: laser");
    }
    fn play_explosion(&mut self) {
        log::debug!("sfx: explosion");
    }
    fn play_hit(&mut self) {
        log::trace!("sfx: hit");
    }
    fn play_thrust_loop(&mut self) {
        log::trace!("sfx: thrust on");
    }
    fn stop_thrust_loop(&mut self) {
        log::trace!("sfx: thrust off");
    }
    fn play_beat(&mut self, note: BeatNote) {
        log::trace!("music: {:?}", note);
    }
}

/// Maps simulation events onto audio cues
pub struct AudioRouter<C: AudioCues> {
    cues: C,
    settings: Settings,
    /// Thrust loop currently audible
    thrusting: bool,
}

impl<C: AudioCues> AudioRouter<C> {
    pub fn new(cues: C, settings: Settings) -> Self {
        Self {
            cues,
            settings,
            thrusting: false,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Replace settings; silences the thrust loop if sound was switched off
    pub fn set_settings(&mut self, settings: Settings) {
        if !settings.sound_on && self.thrusting {
            self.cues.stop_thrust_loop();
            self.thrusting = false;
        }
        self.settings = settings;
    }

    pub fn cues(&self) -> &C {
        &self.cues
    }

    pub fn cues_mut(&mut self) -> &mut C {
        &mut self.cues
    }

    /// Play the cues for one tick's events
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for event in events {
            match *event {
                GameEvent::Beat(note) => {
                    if self.settings.music_on {
                        self.cues.play_beat(note);
                    }
                }
                GameEvent::ThrustStopped => {
                    // Always honour a stop so a muted loop can't keep running
                    if self.thrusting {
                        self.cues.stop_thrust_loop();
                        self.thrusting = false;
                    }
                }
                _ if !self.settings.sound_on => {}
                GameEvent::LaserFired => self.cues.play_laser(),
                GameEvent::AsteroidDestroyed { .. } => self.cues.play_hit(),
                GameEvent::ShipExploded => self.cues.play_explosion(),
                GameEvent::ThrustStarted => {
                    self.cues.play_thrust_loop();
                    self.thrusting = true;
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::AsteroidTier;
    use glam::Vec2;

    #[derive(Default)]
    struct Recorder {
        played: Vec<&'static str>,
    }

    impl AudioCues for Recorder {
        fn play_laser(&mut self) {
            self.played.push("laser");
        }
        fn play_explosion(&mut self) {
            self.played.push("explosion");
        }
        fn play_hit(&mut self) {
            self.played.push("hit");
        }
        fn play_thrust_loop(&mut self) {
            self.played.push("thrust_on");
        }
        fn stop_thrust_loop(&mut self) {
            self.played.push("thrust_off");
        }
        fn play_beat(&mut self, note: BeatNote) {
            self.played.push(match note {
                BeatNote::Low => "low",
                BeatNote::High => "high",
            });
        }
    }

    #[test]
    fn test_tempo_from_ratio() {
        let mut beat = MusicBeat::new();
        beat.set_asteroid_ratio(1.0);
        assert!((beat.tempo() - 1.0).abs() < 1e-6);
        beat.set_asteroid_ratio(0.0);
        assert!((beat.tempo() - 0.25).abs() < 1e-6);
        beat.set_asteroid_ratio(0.5);
        assert!((beat.tempo() - 0.625).abs() < 1e-6);
    }

    #[test]
    fn test_beat_alternates_and_counts_down() {
        let mut beat = MusicBeat::new();
        assert_eq!(beat.tick(30.0), Some(BeatNote::Low));
        // One second at 30 fps: 30 silent frames, then the next beat
        for _ in 0..30 {
            assert_eq!(beat.tick(30.0), None);
        }
        assert_eq!(beat.tick(30.0), Some(BeatNote::High));
    }

    #[test]
    fn test_router_respects_switches() {
        let mut settings = Settings::default();
        settings.sound_on = false;
        let mut router = AudioRouter::new(Recorder::default(), settings);

        router.dispatch(&[
            GameEvent::LaserFired,
            GameEvent::Beat(BeatNote::Low),
            GameEvent::AsteroidDestroyed {
                tier: AsteroidTier::Small,
                pos: Vec2::ZERO,
            },
        ]);
        assert_eq!(router.cues().played, vec!["low"]);
    }

    #[test]
    fn test_router_thrust_loop() {
        let mut router = AudioRouter::new(Recorder::default(), Settings::default());
        router.dispatch(&[GameEvent::ThrustStarted]);

        let mut muted = Settings::default();
        muted.sound_on = false;
        router.set_settings(muted);

        router.dispatch(&[GameEvent::ThrustStopped]);
        assert_eq!(router.cues().played, vec!["thrust_on", "thrust_off"]);
    }
}

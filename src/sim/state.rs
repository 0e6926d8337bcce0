//! Game state and core simulation types
//!
//! Everything a frame needs lives in [`GameState`]; there is no ambient
//! global state. Level and life transitions are methods on the aggregate.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::belt::create_asteroid_belt;
use super::spawn::new_ship;
use crate::audio::{BeatNote, MusicBeat};
use crate::highscores::load_high_score;
use crate::persistence::KeyValueStore;
use crate::tuning::Tuning;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ship alive or respawning
    Playing,
    /// Lives exhausted; a new game starts once the banner fades
    GameOver,
}

/// The three fixed asteroid sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidTier {
    Large,
    Medium,
    Small,
}

impl AsteroidTier {
    /// Radius of this tier for a given base size
    pub fn radius(self, roid_size: f32) -> f32 {
        match self {
            AsteroidTier::Large => (roid_size / 2.0).ceil(),
            AsteroidTier::Medium => (roid_size / 4.0).ceil(),
            AsteroidTier::Small => (roid_size / 8.0).ceil(),
        }
    }

    /// Classify a radius; anything that isn't large or medium counts as small
    pub fn from_radius(r: f32, roid_size: f32) -> Self {
        if r == AsteroidTier::Large.radius(roid_size) {
            AsteroidTier::Large
        } else if r == AsteroidTier::Medium.radius(roid_size) {
            AsteroidTier::Medium
        } else {
            AsteroidTier::Small
        }
    }

    /// Tier of the two fragments left behind, if any
    pub fn child(self) -> Option<Self> {
        match self {
            AsteroidTier::Large => Some(AsteroidTier::Medium),
            AsteroidTier::Medium => Some(AsteroidTier::Small),
            AsteroidTier::Small => None,
        }
    }

    /// Score for destroying one asteroid of this tier
    pub fn points(self, tuning: &Tuning) -> u64 {
        match self {
            AsteroidTier::Large => tuning.roid_pts_large,
            AsteroidTier::Medium => tuning.roid_pts_medium,
            AsteroidTier::Small => tuning.roid_pts_small,
        }
    }
}

/// A laser bolt owned by the ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Laser {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    /// Cumulative distance travelled
    pub dist: f32,
    /// Frames of hit explosion left (0 = in flight)
    pub explode_time: u32,
}

impl Laser {
    #[inline]
    pub fn is_exploding(&self) -> bool {
        self.explode_time > 0
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Collision radius
    pub r: f32,
    /// Heading in radians (π/2 = up; screen y grows downward)
    pub a: f32,
    /// Rotation per frame in radians
    pub rot: f32,
    /// Velocity in pixels per frame
    pub thrust: Vec2,
    pub thrusting: bool,
    /// Cleared on every shot, re-armed by releasing fire
    pub can_shoot: bool,
    pub dead: bool,
    /// Frames of explosion left (0 = not exploding)
    pub explode_time: u32,
    /// Blink toggles left in the invincibility window
    pub blink_num: u32,
    /// Frames until the next blink toggle
    pub blink_time: u32,
    pub lasers: Vec<Laser>,
}

impl Ship {
    #[inline]
    pub fn is_exploding(&self) -> bool {
        self.explode_time > 0
    }

    /// Asteroid collisions are ignored while blinking
    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.blink_num > 0
    }

    /// The "on" half of the blink cycle
    #[inline]
    pub fn blink_on(&self) -> bool {
        self.blink_num % 2 == 0
    }

    /// Whether the hull should be drawn this frame
    pub fn is_visible(&self) -> bool {
        self.blink_on() && !self.dead && !self.is_exploding()
    }

    /// Unit heading in screen space
    #[inline]
    pub fn heading(&self) -> Vec2 {
        Vec2::new(self.a.cos(), -self.a.sin())
    }

    /// Tip of the hull, where lasers spawn
    pub fn nose(&self) -> Vec2 {
        self.pos + self.heading() * (2.0 * self.r)
    }
}

/// A drifting asteroid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    /// Nominal collision radius
    pub r: f32,
    /// Rotation phase of the outline (cosmetic)
    pub a: f32,
    /// Outline vertex count
    pub vert: usize,
    /// Per-vertex radius multipliers in [1 - jag, 1 + jag]
    pub offs: Vec<f32>,
}

impl Asteroid {
    pub fn tier(&self, roid_size: f32) -> AsteroidTier {
        AsteroidTier::from_radius(self.r, roid_size)
    }
}

/// Things that happened during a tick, for audio and UI hosts
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum GameEvent {
    NewGame,
    LevelStarted(u32),
    LaserFired,
    AsteroidDestroyed { tier: AsteroidTier, pos: Vec2 },
    /// Remaining-asteroid ratio for the music tempo
    TempoRatio(f32),
    NewHighScore(u64),
    ShipExploded,
    LifeLost { lives_left: u32 },
    GameOver,
    ThrustStarted,
    ThrustStopped,
    Beat(BeatNote),
}

fn unseeded_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Not serialized; call [`GameState::reseed`] after loading
    #[serde(skip, default = "unseeded_rng")]
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    /// Current level (0-based, shown +1)
    pub level: u32,
    pub lives: u32,
    pub score: u64,
    pub score_high: u64,
    pub phase: GamePhase,
    pub ship: Ship,
    /// The belt
    pub asteroids: Vec<Asteroid>,
    /// Approximate asteroid count for this level (tempo signal only)
    pub roids_total: u32,
    pub roids_left: u32,
    /// Banner text and its fading alpha
    pub text: String,
    pub text_alpha: f32,
    pub music: MusicBeat,
    /// Simulation tick counter
    pub frame: u64,
    /// Thrust loop was audible last tick
    #[serde(skip)]
    pub(crate) thrust_audible: bool,
    /// Events raised by the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a state and start a new game
    pub fn new(seed: u64, tuning: Tuning, store: &dyn KeyValueStore) -> Self {
        let ship = new_ship(&tuning);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            level: 0,
            lives: 0,
            score: 0,
            score_high: 0,
            phase: GamePhase::Playing,
            ship,
            asteroids: Vec::new(),
            roids_total: 0,
            roids_left: 0,
            text: String::new(),
            text_alpha: 0.0,
            music: MusicBeat::new(),
            frame: 0,
            thrust_audible: false,
            events: Vec::new(),
        };
        state.new_game(store);
        state
    }

    /// Restore a deterministic RNG stream (after deserializing)
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
    }

    /// Reset level, lives and score and build a fresh ship and belt
    pub fn new_game(&mut self, store: &dyn KeyValueStore) {
        self.level = 0;
        self.lives = self.tuning.game_lives;
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.ship = new_ship(&self.tuning);
        self.score_high = load_high_score(store);
        self.music = MusicBeat::new();
        log::info!("New game (seed {}, high score {})", self.seed, self.score_high);
        self.events.push(GameEvent::NewGame);
        self.new_level();
    }

    /// Show the level banner and repopulate the belt
    pub fn new_level(&mut self) {
        self.text = format!("Level {}", self.level + 1);
        self.text_alpha = 1.0;
        create_asteroid_belt(self);
        log::info!(
            "Level {}: {} asteroids",
            self.level + 1,
            self.asteroids.len()
        );
        self.events.push(GameEvent::LevelStarted(self.level));
    }

    /// Start the ship's explosion countdown
    pub fn explode_ship(&mut self) {
        self.ship.explode_time = self.tuning.ship_explode_frames();
        log::debug!("Ship exploded at ({:.1}, {:.1})", self.ship.pos.x, self.ship.pos.y);
        self.events.push(GameEvent::ShipExploded);
    }

    /// Consume a life once the explosion has played out
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::LifeLost {
            lives_left: self.lives,
        });
        if self.lives == 0 {
            self.game_over();
        } else {
            self.ship = new_ship(&self.tuning);
        }
    }

    pub fn game_over(&mut self) {
        self.ship.dead = true;
        self.phase = GamePhase::GameOver;
        self.text = "Game Over".to_string();
        self.text_alpha = 1.0;
        log::info!("Game over at level {} with score {}", self.level + 1, self.score);
        self.events.push(GameEvent::GameOver);
    }

    /// Fade the banner; once the game-over banner is gone, start over
    pub fn update_text(&mut self, store: &dyn KeyValueStore) {
        if self.text_alpha >= 0.0 {
            self.text_alpha -= self.tuning.text_fade_step();
        } else if self.ship.dead {
            self.new_game(store);
        }
    }

    /// Fraction of this level's asteroids still alive (1 when none are left)
    pub fn asteroid_ratio(&self) -> f32 {
        if self.roids_left == 0 || self.roids_total == 0 {
            1.0
        } else {
            self.roids_left as f32 / self.roids_total as f32
        }
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

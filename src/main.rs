//! Roid Belt entry point
//!
//! On the web the page drives the game: it forwards key events and calls
//! `frame` from `requestAnimationFrame`, drawing the returned snapshot and
//! playing the returned cues. Natively there is no window; the binary runs a
//! headless session with an autopilot and logs how it went.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;

    use serde::Serialize;
    use wasm_bindgen::prelude::*;

    use roid_belt::audio::{AudioCues, AudioRouter, BeatNote};
    use roid_belt::persistence::LocalStorage;
    use roid_belt::platform::{FrameClock, InputState, init_logging};
    use roid_belt::renderer::FrameSnapshot;
    use roid_belt::sim::{GameState, tick};
    use roid_belt::{Settings, Tuning};

    /// Cue names handed to the page's audio elements
    #[derive(Default)]
    struct QueuedCues {
        names: Vec<&'static str>,
    }

    impl AudioCues for QueuedCues {
        fn play_laser(&mut self) {
            self.names.push("laser");
        }
        fn play_explosion(&mut self) {
            self.names.push("explode");
        }
        fn play_hit(&mut self) {
            self.names.push("hit");
        }
        fn play_thrust_loop(&mut self) {
            self.names.push("thrust");
        }
        fn stop_thrust_loop(&mut self) {
            self.names.push("thrust_stop");
        }
        fn play_beat(&mut self, note: BeatNote) {
            self.names.push(match note {
                BeatNote::Low => "music_low",
                BeatNote::High => "music_high",
            });
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        store: LocalStorage,
        input: InputState,
        clock: FrameClock,
        audio: AudioRouter<QueuedCues>,
    }

    #[derive(Serialize)]
    struct FrameOut<'a> {
        frame: FrameSnapshot<'a>,
        cues: &'a [&'static str],
    }

    thread_local! {
        static GAME: RefCell<Option<Game>> = const { RefCell::new(None) };
    }

    fn with_game<R>(f: impl FnOnce(&mut Game) -> R) -> Option<R> {
        GAME.with(|cell| cell.borrow_mut().as_mut().map(f))
    }

    pub fn start() {
        init_logging();
        log::info!("Roid Belt starting...");

        let seed = js_sys::Date::now() as u64 ^ (js_sys::Math::random() * u32::MAX as f64) as u64;
        let store = LocalStorage;
        let settings = Settings::load(&store);
        let state = GameState::new(seed, Tuning::default(), &store);
        let clock = FrameClock::new(state.tuning.fps);

        GAME.with(|cell| {
            *cell.borrow_mut() = Some(Game {
                state,
                store,
                input: InputState::new(),
                clock,
                audio: AudioRouter::new(QueuedCues::default(), settings),
            });
        });
        log::info!("Game initialized with seed: {}", seed);
    }

    /// Returns true when the key is bound, so the page can suppress scrolling
    #[wasm_bindgen]
    pub fn key_down(key: &str) -> bool {
        with_game(|g| g.input.key_name(key, true)).unwrap_or(false)
    }

    #[wasm_bindgen]
    pub fn key_up(key: &str) -> bool {
        with_game(|g| g.input.key_name(key, false)).unwrap_or(false)
    }

    /// Window lost focus: release held keys and forget the partial tick
    #[wasm_bindgen]
    pub fn blur() {
        with_game(|g| {
            g.input.release_all();
            g.clock.reset();
        });
    }

    #[wasm_bindgen]
    pub fn toggle_music() -> bool {
        with_game(|g| {
            let mut settings = g.audio.settings().clone();
            settings.toggle_music();
            settings.save(&mut g.store);
            let on = settings.music_on;
            g.audio.set_settings(settings);
            on
        })
        .unwrap_or(false)
    }

    #[wasm_bindgen]
    pub fn toggle_sound() -> bool {
        with_game(|g| {
            let mut settings = g.audio.settings().clone();
            settings.toggle_sound();
            settings.save(&mut g.store);
            let on = settings.sound_on;
            g.audio.set_settings(settings);
            on
        })
        .unwrap_or(false)
    }

    /// Advance by `dt` seconds of wall time; returns the frame to draw as JSON
    #[wasm_bindgen]
    pub fn frame(dt: f32) -> Result<String, JsValue> {
        with_game(|g| {
            g.audio.cues_mut().names.clear();
            for _ in 0..g.clock.advance(dt) {
                let input = g.input.take_tick_input();
                tick(&mut g.state, &input, &mut g.store);
                g.audio.dispatch(&g.state.events);
            }

            let out = FrameOut {
                frame: FrameSnapshot::capture(&g.state, g.audio.settings()),
                cues: &g.audio.cues().names,
            };
            serde_json::to_string(&out).map_err(|e| JsValue::from_str(&e.to_string()))
        })
        .unwrap_or_else(|| Err(JsValue::from_str("game not started")))
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::f32::consts::{PI, TAU};
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use clap::Parser;

    use roid_belt::audio::{AudioRouter, LogCues};
    use roid_belt::persistence::FileStore;
    use roid_belt::platform::input::GameKey;
    use roid_belt::platform::{FrameClock, InputState};
    use roid_belt::renderer::{FrameSnapshot, LogRenderer, Renderer};
    use roid_belt::sim::{GameEvent, GameState, tick};
    use roid_belt::{Result, Settings, Tuning, dist_between_points};

    /// Host refresh rate the session pretends to run at
    const HOST_DT: f32 = 1.0 / 60.0;
    const DEFAULT_SAVE_PATH: &str = "roid_belt_save.json";

    #[derive(Parser, Debug)]
    #[command(name = "roid-belt")]
    #[command(about = "Fly a headless Roid Belt session with the autopilot")]
    pub struct Cli {
        /// Tuning JSON; built-in defaults when omitted
        #[arg(long)]
        pub tuning: Option<PathBuf>,

        /// Simulated host time to run, in seconds
        #[arg(long, default_value_t = 60.0, value_parser = parse_seconds)]
        pub seconds: f32,

        /// RNG seed; taken from the wall clock when omitted
        #[arg(long, env = "ROID_BELT_SEED")]
        pub seed: Option<u64>,

        /// Save file for settings and the high score
        #[arg(long, env = "ROID_BELT_SAVE", default_value = DEFAULT_SAVE_PATH)]
        pub save: PathBuf,
    }

    fn parse_seconds(s: &str) -> std::result::Result<f32, String> {
        let seconds: f32 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
        if seconds.is_finite() && seconds >= 0.0 {
            Ok(seconds)
        } else {
            Err(format!("`{s}` must be a finite, non-negative number of seconds"))
        }
    }

    /// Turns toward the nearest asteroid and taps fire when lined up
    #[derive(Default)]
    struct Autopilot {
        fire_held: bool,
    }

    impl Autopilot {
        fn steer(&mut self, state: &GameState, input: &mut InputState) {
            let ship = &state.ship;
            let Some(target) = state.asteroids.iter().min_by(|a, b| {
                dist_between_points(ship.pos, a.pos).total_cmp(&dist_between_points(ship.pos, b.pos))
            }) else {
                return;
            };

            let to = target.pos - ship.pos;
            let want = (-to.y).atan2(to.x);
            let diff = (want - ship.a + PI).rem_euclid(TAU) - PI;
            let turn = state.tuning.turn_rate();
            let (left, right) = (diff > turn, diff < -turn);

            // Releases first so a stop never cancels the new direction
            if !left {
                input.key(GameKey::RotateLeft, false);
            }
            if !right {
                input.key(GameKey::RotateRight, false);
            }
            input.key(GameKey::RotateLeft, left);
            input.key(GameKey::RotateRight, right);

            self.fire_held = diff.abs() < 0.15 && !self.fire_held;
            input.key(GameKey::Fire, self.fire_held);
        }
    }

    fn clock_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    pub fn run(cli: Cli) -> Result<()> {
        let tuning = match &cli.tuning {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };
        let seed = cli.seed.unwrap_or_else(clock_seed);
        log::info!("Seed {}, save file {}", seed, cli.save.display());

        let mut store = FileStore::new(cli.save);
        let settings = Settings::load(&store);

        let mut state = GameState::new(seed, tuning, &store);
        let mut clock = FrameClock::new(state.tuning.fps);
        let mut input = InputState::new();
        let mut pilot = Autopilot::default();
        let mut audio = AudioRouter::new(LogCues, settings);
        let mut renderer = LogRenderer::new(60);

        audio.dispatch(&state.drain_events());

        let host_frames = (cli.seconds / HOST_DT) as u64;
        let (mut games, mut destroyed, mut best_level) = (1u32, 0u32, 0u32);
        for _ in 0..host_frames {
            for _ in 0..clock.advance(HOST_DT) {
                pilot.steer(&state, &mut input);
                let tick_input = input.take_tick_input();
                tick(&mut state, &tick_input, &mut store);
                audio.dispatch(&state.events);

                for event in &state.events {
                    match event {
                        GameEvent::NewGame => games += 1,
                        GameEvent::AsteroidDestroyed { .. } => destroyed += 1,
                        GameEvent::LevelStarted(level) => best_level = best_level.max(*level),
                        _ => {}
                    }
                }
            }
            renderer.draw(&FrameSnapshot::capture(&state, audio.settings()));
        }

        log::info!(
            "Session over after {} ticks: {} game(s), {} asteroids destroyed, best level {}",
            clock.ticks(),
            games,
            destroyed,
            best_level + 1
        );
        log::info!(
            "Current score {} at level {}, high score {}",
            state.score,
            state.level + 1,
            state.score_high
        );
        Ok(())
    }

}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::start();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    let cli = headless::Cli::parse();
    roid_belt::platform::init_logging();
    log::info!("Roid Belt (native, headless) starting...");

    if let Err(e) = headless::run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

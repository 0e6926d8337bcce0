//! Asteroid belt management
//!
//! Populates the belt for each level, moves it, and splits asteroids when
//! they are destroyed.

use glam::Vec2;
use rand::Rng;

use super::spawn::new_asteroid;
use super::state::{AsteroidTier, GameEvent, GameState};
use crate::consts::MAX_SPAWN_ATTEMPTS;
use crate::highscores::submit_score;
use crate::persistence::KeyValueStore;
use crate::tuning::Tuning;
use crate::{dist_between_points, wrap_with_margin};

/// Fragments left behind by a large or medium asteroid
pub const SPLIT_COUNT: usize = 2;

/// Asteroids destroyed per large one (itself, 2 medium, 4 small)
const ROIDS_PER_LARGE: u32 = 7;

/// Clear the belt and spawn `roid_num + level` large asteroids clear of the ship
pub fn create_asteroid_belt(state: &mut GameState) {
    state.asteroids.clear();

    let count = state.tuning.roid_num + state.level;
    state.roids_total = count * ROIDS_PER_LARGE;
    state.roids_left = state.roids_total;

    let r = AsteroidTier::Large.radius(state.tuning.roid_size);
    let keep_out = 2.0 * r + state.ship.r;

    for _ in 0..count {
        let pos = spawn_point(&mut state.rng, &state.tuning, state.ship.pos, keep_out);
        let roid = new_asteroid(&mut state.rng, &state.tuning, state.level, pos, r);
        state.asteroids.push(roid);
    }
}

/// Pick a whole-pixel point on the field at least `keep_out` from `avoid`
fn spawn_point<R: Rng>(rng: &mut R, tuning: &Tuning, avoid: Vec2, keep_out: f32) -> Vec2 {
    let mut candidate = Vec2::ZERO;
    for _ in 0..MAX_SPAWN_ATTEMPTS {
        candidate = Vec2::new(
            (rng.random::<f32>() * tuning.field_width).floor(),
            (rng.random::<f32>() * tuning.field_height).floor(),
        );
        if dist_between_points(avoid, candidate) >= keep_out {
            return candidate;
        }
    }
    log::warn!(
        "No spawn point {:.0}px clear of the ship after {} attempts; field too small?",
        keep_out,
        MAX_SPAWN_ATTEMPTS
    );
    candidate
}

/// Move every asteroid one frame and wrap it around the field edges
pub fn advance_asteroids(state: &mut GameState) {
    let (width, height) = (state.tuning.field_width, state.tuning.field_height);
    for roid in &mut state.asteroids {
        roid.pos += roid.vel;
        roid.pos.x = wrap_with_margin(roid.pos.x, width, roid.r);
        roid.pos.y = wrap_with_margin(roid.pos.y, height, roid.r);
    }
}

/// Destroy the asteroid at `index`: split it, score it, and advance the level
/// if the belt is now empty.
///
/// Fragments are appended to the end of the belt, so a caller walking the belt
/// by descending index never revisits them this frame. Returns true when a new
/// level was started.
pub fn destroy_asteroid(
    state: &mut GameState,
    index: usize,
    store: &mut dyn KeyValueStore,
) -> bool {
    let (pos, r) = {
        let roid = &state.asteroids[index];
        (roid.pos, roid.r)
    };
    let tier = AsteroidTier::from_radius(r, state.tuning.roid_size);

    if let Some(child) = tier.child() {
        let child_r = child.radius(state.tuning.roid_size);
        for _ in 0..SPLIT_COUNT {
            let roid = new_asteroid(&mut state.rng, &state.tuning, state.level, pos, child_r);
            state.asteroids.push(roid);
        }
    }

    state.score += tier.points(&state.tuning);
    if submit_score(&mut state.score_high, state.score, store) {
        state.events.push(GameEvent::NewHighScore(state.score_high));
    }

    state.asteroids.remove(index);
    log::debug!(
        "Destroyed {:?} asteroid at ({:.0}, {:.0}); belt now {}",
        tier,
        pos.x,
        pos.y,
        state.asteroids.len()
    );
    state.events.push(GameEvent::AsteroidDestroyed { tier, pos });

    state.roids_left = state.roids_left.saturating_sub(1);
    let ratio = state.asteroid_ratio();
    state.music.set_asteroid_ratio(ratio);
    state.events.push(GameEvent::TempoRatio(ratio));

    if state.asteroids.is_empty() {
        state.level += 1;
        state.new_level();
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use crate::sim::spawn::new_asteroid;
    use proptest::prelude::*;

    fn state() -> GameState {
        GameState::new(42, Tuning::default(), &MemoryStore::new())
    }

    #[test]
    fn test_belt_size_grows_with_level() {
        let mut state = state();
        assert_eq!(state.asteroids.len(), 1);

        state.level = 3;
        create_asteroid_belt(&mut state);
        assert_eq!(state.asteroids.len(), 4);
        assert_eq!(state.roids_total, 28);
        assert_eq!(state.roids_left, 28);
        assert!(state.asteroids.iter().all(|a| a.r == 50.0));
    }

    #[test]
    fn test_belt_spawns_clear_of_ship() {
        let mut state = state();
        state.level = 20;
        for _ in 0..10 {
            create_asteroid_belt(&mut state);
            for roid in &state.asteroids {
                let d = dist_between_points(state.ship.pos, roid.pos);
                assert!(d >= 2.0 * 50.0 + state.ship.r);
                assert_eq!(roid.pos.x, roid.pos.x.floor());
            }
        }
    }

    #[test]
    fn test_destroy_large_splits_into_two_medium() {
        let mut state = state();
        let mut store = MemoryStore::new();
        let extra = new_asteroid(&mut state.rng, &state.tuning, 0, Vec2::new(100.0, 100.0), 50.0);
        state.asteroids.push(extra);
        let before = state.asteroids.len();

        let new_level = destroy_asteroid(&mut state, before - 1, &mut store);

        assert!(!new_level);
        assert_eq!(state.asteroids.len(), before + 1);
        assert_eq!(state.score, 20);
        let children: Vec<_> = state.asteroids.iter().filter(|a| a.r == 25.0).collect();
        assert_eq!(children.len(), 2);
        assert!(children.iter().all(|a| a.pos == Vec2::new(100.0, 100.0)));
        assert_eq!(state.roids_left, 6);
    }

    #[test]
    fn test_destroy_small_removes_one() {
        let mut state = state();
        let mut store = MemoryStore::new();
        let small = new_asteroid(&mut state.rng, &state.tuning, 0, Vec2::new(10.0, 10.0), 13.0);
        state.asteroids.push(small);
        let before = state.asteroids.len();

        destroy_asteroid(&mut state, before - 1, &mut store);
        assert_eq!(state.asteroids.len(), before - 1);
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_clearing_belt_starts_next_level() {
        let mut state = state();
        let mut store = MemoryStore::new();
        let small = new_asteroid(&mut state.rng, &state.tuning, 0, Vec2::new(10.0, 10.0), 13.0);
        state.asteroids = vec![small];

        assert!(destroy_asteroid(&mut state, 0, &mut store));
        assert_eq!(state.level, 1);
        assert_eq!(state.text, "Level 2");
        assert_eq!(state.asteroids.len(), 2);
        assert!(state.events.contains(&GameEvent::LevelStarted(1)));
    }

    #[test]
    fn test_high_score_written_through() {
        let mut state = state();
        let mut store = MemoryStore::new();
        destroy_asteroid(&mut state, 0, &mut store);
        assert_eq!(state.score_high, 20);
        assert_eq!(crate::highscores::load_high_score(&store), 20);
        assert!(state.events.contains(&GameEvent::NewHighScore(20)));
    }

    #[test]
    fn test_tempo_speeds_up_as_belt_empties() {
        let mut state = state();
        let mut store = MemoryStore::new();
        let slow = state.music.tempo();
        destroy_asteroid(&mut state, 0, &mut store);
        assert!(state.music.tempo() < slow);
    }

    #[test]
    fn test_asteroids_wrap_with_own_radius() {
        let mut state = state();
        let width = state.tuning.field_width;
        state.asteroids[0].pos = Vec2::new(width + 50.0 - 1.0, 100.0);
        state.asteroids[0].vel = Vec2::new(1.0, 0.0);
        advance_asteroids(&mut state);
        assert_eq!(state.asteroids[0].pos.x, -50.0);
    }

    proptest! {
        #[test]
        fn prop_destruction_invariants(seed in any::<u64>(), picks in prop::collection::vec(any::<prop::sample::Index>(), 1..40)) {
            let mut state = GameState::new(seed, Tuning::default(), &MemoryStore::new());
            let mut store = MemoryStore::new();
            let roid_size = state.tuning.roid_size;
            let tiers = [
                AsteroidTier::Large.radius(roid_size),
                AsteroidTier::Medium.radius(roid_size),
                AsteroidTier::Small.radius(roid_size),
            ];
            let mut max_score = 0;

            for pick in picks {
                let index = pick.index(state.asteroids.len());
                let tier = state.asteroids[index].tier(roid_size);
                let before = state.asteroids.len();
                let level = state.level;
                let score = state.score;

                let new_level = destroy_asteroid(&mut state, index, &mut store);

                prop_assert!(state.score > score);
                max_score = max_score.max(state.score);
                prop_assert_eq!(state.score_high, max_score);
                prop_assert_eq!(crate::highscores::load_high_score(&store), max_score);

                if new_level {
                    prop_assert_eq!(state.level, level + 1);
                } else {
                    let expected = match tier {
                        AsteroidTier::Small => before - 1,
                        _ => before + 1,
                    };
                    prop_assert_eq!(state.asteroids.len(), expected);
                }
                for roid in &state.asteroids {
                    prop_assert!(tiers.contains(&roid.r));
                }
            }
        }
    }
}

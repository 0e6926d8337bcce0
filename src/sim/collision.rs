//! Collision detection and response
//!
//! Everything is a circle: lasers are points, asteroids use their nominal
//! radius (outline jitter is cosmetic), the ship uses its collision radius.
//! Resolution order is fixed so a seeded run always plays out the same way.

use glam::Vec2;

use super::belt::destroy_asteroid;
use super::state::{Asteroid, GameState, Laser};
use crate::dist_between_points;
use crate::persistence::KeyValueStore;

/// A laser in flight strikes an asteroid whose centre is strictly closer than
/// its radius. Lasers already exploding can't hit again.
#[inline]
pub fn laser_hits_asteroid(laser: &Laser, roid: &Asteroid) -> bool {
    !laser.is_exploding() && dist_between_points(laser.pos, roid.pos) < roid.r
}

/// Two circles overlap
#[inline]
pub fn circles_collide(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    dist_between_points(a, b) < ra + rb
}

/// Resolve laser strikes for this frame.
///
/// Asteroids are walked by descending index and lasers likewise; each
/// asteroid takes at most one hit. Fragments land past the walk position so
/// they are not struck in the frame they appear. Stops early if clearing the
/// belt started a new level. Returns the number of asteroids destroyed.
pub fn resolve_laser_hits(state: &mut GameState, store: &mut dyn KeyValueStore) -> usize {
    let explode_frames = state.tuning.laser_explode_frames();
    let mut destroyed = 0;

    for i in (0..state.asteroids.len()).rev() {
        let roid = &state.asteroids[i];
        let Some(j) = state
            .ship
            .lasers
            .iter()
            .rposition(|laser| laser_hits_asteroid(laser, roid))
        else {
            continue;
        };

        state.ship.lasers[j].explode_time = explode_frames;
        destroyed += 1;
        if destroy_asteroid(state, i, store) {
            break;
        }
    }

    destroyed
}

/// Check the ship against the belt.
///
/// Skipped while the ship is exploding, invincible or dead. The first
/// asteroid touched (by ascending index) is destroyed and the ship explodes.
pub fn resolve_ship_collision(state: &mut GameState, store: &mut dyn KeyValueStore) -> bool {
    let ship = &state.ship;
    if ship.is_exploding() || ship.is_invincible() || ship.dead {
        return false;
    }

    let Some(i) = state
        .asteroids
        .iter()
        .position(|roid| circles_collide(ship.pos, ship.r, roid.pos, roid.r))
    else {
        return false;
    };

    state.explode_ship();
    destroy_asteroid(state, i, store);
    true
}

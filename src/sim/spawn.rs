//! Entity construction
//!
//! Randomized fields draw from the caller's RNG so a seeded run replays
//! identically.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};

use super::state::{Asteroid, Laser, Ship};
use crate::tuning::Tuning;

/// Build an asteroid of radius `r` at `pos` with random drift and outline.
///
/// Drift speed per axis is up to `roid_speed * (1 + 0.1 * level) / fps`,
/// so later levels move faster.
pub fn new_asteroid<R: Rng>(
    rng: &mut R,
    tuning: &Tuning,
    level: u32,
    pos: Vec2,
    r: f32,
) -> Asteroid {
    let lvl_mult = 1.0 + 0.1 * level as f32;
    let max_speed = tuning.roid_speed * lvl_mult / tuning.fps;

    let axis_speed = |rng: &mut R| {
        let speed = rng.random::<f32>() * max_speed;
        if rng.random_bool(0.5) { speed } else { -speed }
    };
    let vel = Vec2::new(axis_speed(&mut *rng), axis_speed(&mut *rng));

    let a = rng.random::<f32>() * TAU;
    let avg = tuning.roid_vert as f32;
    let vert = (rng.random::<f32>() * (avg + 1.0) + avg / 2.0).floor() as usize;

    let jag = tuning.roid_jag;
    let offs = (0..vert)
        .map(|_| rng.random::<f32>() * jag * 2.0 + 1.0 - jag)
        .collect();

    Asteroid {
        pos,
        vel,
        r,
        a,
        vert,
        offs,
    }
}

/// A fresh ship: centred, facing up, invincible and blinking
pub fn new_ship(tuning: &Tuning) -> Ship {
    Ship {
        pos: Vec2::new(tuning.field_width / 2.0, tuning.field_height / 2.0),
        r: tuning.ship_size / 2.0,
        a: FRAC_PI_2,
        rot: 0.0,
        thrust: Vec2::ZERO,
        thrusting: false,
        can_shoot: true,
        dead: false,
        explode_time: 0,
        blink_num: tuning.invincible_blinks(),
        blink_time: tuning.blink_frames(),
        lasers: Vec::new(),
    }
}

/// A laser leaving the ship's nose along its heading
pub fn new_laser(ship: &Ship, tuning: &Tuning) -> Laser {
    Laser {
        pos: ship.nose(),
        vel: ship.heading() * (tuning.laser_speed / tuning.fps),
        dist: 0.0,
        explode_time: 0,
    }
}

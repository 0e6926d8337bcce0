//! Outline generation for the game's line-art primitives
//!
//! All points are in field pixels with y growing downward, matching the
//! simulation. Hosts stroke or fill them however they like.

use glam::Vec2;
use serde::Serialize;
use std::f32::consts::{FRAC_PI_2, TAU};

use crate::sim::{Asteroid, Ship};

/// Ship hull triangle: nose, rear left, rear right.
///
/// The nose sits `2r` ahead of the centre; the rear corners sit `2r/3` behind
/// it and `r` to either side.
pub fn ship_hull(pos: Vec2, r: f32, a: f32) -> [Vec2; 3] {
    let (sin, cos) = a.sin_cos();
    [
        Vec2::new(pos.x + 2.0 * r * cos, pos.y - 2.0 * r * sin),
        Vec2::new(
            pos.x - r * (2.0 / 3.0 * cos + sin),
            pos.y + r * (2.0 / 3.0 * sin - cos),
        ),
        Vec2::new(
            pos.x - r * (2.0 / 3.0 * cos - sin),
            pos.y + r * (2.0 / 3.0 * sin + cos),
        ),
    ]
}

/// Thruster flame behind the hull: rear left, tip, rear right
pub fn thruster_flame(ship: &Ship) -> [Vec2; 3] {
    let (pos, r) = (ship.pos, ship.r);
    let (sin, cos) = ship.a.sin_cos();
    [
        Vec2::new(
            pos.x - r * (2.0 / 3.0 * cos + 0.5 * sin),
            pos.y + r * (2.0 / 3.0 * sin - 0.5 * cos),
        ),
        Vec2::new(pos.x - 2.0 * r * cos, pos.y + 2.0 * r * sin),
        Vec2::new(
            pos.x - r * (2.0 / 3.0 * cos - 0.5 * sin),
            pos.y + r * (2.0 / 3.0 * sin + 0.5 * cos),
        ),
    ]
}

/// Jagged polygon outline of an asteroid, one point per vertex.
///
/// Collision still uses the nominal radius; the jitter is cosmetic.
pub fn asteroid_outline(roid: &Asteroid) -> Vec<Vec2> {
    let step = TAU / roid.vert as f32;
    roid.offs
        .iter()
        .enumerate()
        .map(|(j, off)| {
            let theta = roid.a + j as f32 * step;
            roid.pos + Vec2::new(theta.cos(), theta.sin()) * (roid.r * off)
        })
        .collect()
}

/// Radii of the concentric explosion discs around an exploding ship,
/// outermost first
pub fn ship_explosion_radii(r: f32) -> [f32; 5] {
    [1.7 * r, 1.4 * r, 1.1 * r, 0.8 * r, 0.5 * r]
}

/// Radii of a laser's hit flash, outermost first
pub fn laser_explosion_radii(ship_r: f32) -> [f32; 3] {
    [0.75 * ship_r, 0.5 * ship_r, 0.25 * ship_r]
}

/// Radius of a laser bolt in flight
pub fn laser_radius(ship_size: f32) -> f32 {
    ship_size / 15.0
}

/// Hull triangles for the remaining-lives row along the top left
pub fn life_icons(lives: u32, ship_size: f32) -> Vec<[Vec2; 3]> {
    (0..lives)
        .map(|i| {
            let pos = Vec2::new(ship_size + i as f32 * ship_size * 1.2, ship_size);
            ship_hull(pos, ship_size / 2.0, FRAC_PI_2)
        })
        .collect()
}

/// Ready-to-stroke geometry for one frame
#[derive(Debug, Clone, Default, Serialize)]
pub struct Outlines {
    /// Absent while the ship blinks off, explodes or is dead
    pub hull: Option<[Vec2; 3]>,
    pub flame: Option<[Vec2; 3]>,
    /// Disc radii around the ship while it explodes
    pub explosion: Option<[f32; 5]>,
    /// One polygon per asteroid, in belt order
    pub asteroids: Vec<Vec<Vec2>>,
    pub laser_radius: f32,
    pub laser_flash: [f32; 3],
    pub lives: Vec<[Vec2; 3]>,
}

impl Outlines {
    pub fn build(ship: &Ship, asteroids: &[Asteroid], lives: u32) -> Self {
        let ship_size = ship.r * 2.0;
        let visible = ship.is_visible();
        Self {
            hull: visible.then(|| ship_hull(ship.pos, ship.r, ship.a)),
            flame: (visible && ship.thrusting).then(|| thruster_flame(ship)),
            explosion: ship.is_exploding().then(|| ship_explosion_radii(ship.r)),
            asteroids: asteroids.iter().map(asteroid_outline).collect(),
            laser_radius: laser_radius(ship_size),
            laser_flash: laser_explosion_radii(ship.r),
            lives: life_icons(lives, ship_size),
        }
    }
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by index, removals walk backwards)
//! - No rendering or platform dependencies

pub mod belt;
pub mod collision;
pub mod lasers;
pub mod ship;
pub mod spawn;
pub mod state;
pub mod tick;

pub use belt::{advance_asteroids, create_asteroid_belt, destroy_asteroid};
pub use collision::{circles_collide, laser_hits_asteroid, resolve_laser_hits, resolve_ship_collision};
pub use lasers::{advance_lasers, shoot_laser};
pub use ship::{advance_ship, handle_intent};
pub use spawn::{new_asteroid, new_laser, new_ship};
pub use state::{Asteroid, AsteroidTier, GameEvent, GamePhase, GameState, Laser, Ship};
pub use tick::{Intent, TickInput, tick};

//! Ship state machine
//!
//! Normal flight, invincible blinking after spawn, thrusting (orthogonal to
//! the others), exploding, dead. Explosion resolution hands off to
//! [`GameState::lose_life`].

use super::lasers::shoot_laser;
use super::state::{GameEvent, GameState, Ship};
use super::tick::Intent;
use crate::tuning::Tuning;
use crate::wrap_with_margin;

/// Apply one input intent. Ignored entirely once the ship is dead.
pub fn handle_intent(state: &mut GameState, intent: Intent) {
    if state.ship.dead {
        return;
    }

    if intent == Intent::Fire {
        shoot_laser(state);
        return;
    }

    let turn = state.tuning.turn_rate();
    let ship = &mut state.ship;
    match intent {
        Intent::RotateLeftStart => ship.rot = turn,
        Intent::RotateRightStart => ship.rot = -turn,
        Intent::RotateLeftStop | Intent::RotateRightStop => ship.rot = 0.0,
        Intent::ThrustStart => ship.thrusting = true,
        Intent::ThrustStop => ship.thrusting = false,
        Intent::ReleaseFire => ship.can_shoot = true,
        Intent::Fire => {}
    }
}

/// Integrate thrust or friction for one frame
fn apply_thrust(ship: &mut Ship, tuning: &Tuning) {
    if ship.thrusting && !ship.dead {
        ship.thrust.x += tuning.ship_thrust * ship.a.cos() / tuning.fps;
        ship.thrust.y -= tuning.ship_thrust * ship.a.sin() / tuning.fps;
    } else {
        ship.thrust -= tuning.friction * ship.thrust / tuning.fps;
    }
}

/// Count down the invincibility blink cycle
fn advance_blink(ship: &mut Ship, tuning: &Tuning) {
    if ship.blink_num == 0 {
        return;
    }
    ship.blink_time = ship.blink_time.saturating_sub(1);
    if ship.blink_time == 0 {
        ship.blink_time = tuning.blink_frames();
        ship.blink_num -= 1;
    }
}

/// Advance the ship one frame: thrust, blink, rotate and move, or count down
/// an explosion, then wrap around the field edges.
pub fn advance_ship(state: &mut GameState) {
    apply_thrust(&mut state.ship, &state.tuning);

    let audible = state.ship.thrusting && !state.ship.dead;
    if audible != state.thrust_audible {
        state.thrust_audible = audible;
        state.events.push(if audible {
            GameEvent::ThrustStarted
        } else {
            GameEvent::ThrustStopped
        });
    }

    if state.ship.is_exploding() {
        state.ship.explode_time -= 1;
        if state.ship.explode_time == 0 {
            state.lose_life();
        }
    } else {
        let ship = &mut state.ship;
        advance_blink(ship, &state.tuning);
        ship.a += ship.rot;
        ship.pos += ship.thrust;
    }

    let (width, height) = (state.tuning.field_width, state.tuning.field_height);
    let ship = &mut state.ship;
    ship.pos.x = wrap_with_margin(ship.pos.x, width, ship.r);
    ship.pos.y = wrap_with_margin(ship.pos.y, height, ship.r);
}

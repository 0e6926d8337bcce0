//! Laser firing and flight

use super::spawn::new_laser;
use super::state::{GameEvent, GameState, Ship};
use crate::tuning::Tuning;
use crate::wrap_zero_margin;

/// Fire a laser if the trigger is armed and the ship has a free slot.
///
/// The trigger is disarmed either way; releasing fire re-arms it.
pub fn shoot_laser(state: &mut GameState) -> bool {
    let ship = &mut state.ship;
    let fired = ship.can_shoot && ship.lasers.len() < state.tuning.laser_max;
    if fired {
        let laser = new_laser(ship, &state.tuning);
        ship.lasers.push(laser);
        state.events.push(GameEvent::LaserFired);
        log::debug!("Laser fired ({} in flight)", ship.lasers.len());
    }
    ship.can_shoot = false;
    fired
}

/// Move the ship's lasers one frame.
///
/// Lasers past their range are dropped, exploding lasers count down and are
/// dropped at zero, the rest fly on and wrap with no margin.
pub fn advance_lasers(ship: &mut Ship, tuning: &Tuning) {
    let range = tuning.laser_range();

    for i in (0..ship.lasers.len()).rev() {
        let laser = &mut ship.lasers[i];

        if laser.dist > range {
            ship.lasers.remove(i);
            continue;
        }

        if laser.is_exploding() {
            laser.explode_time -= 1;
            if laser.explode_time == 0 {
                ship.lasers.remove(i);
            }
            continue;
        }

        laser.pos += laser.vel;
        laser.dist += laser.vel.length();
        laser.pos.x = wrap_zero_margin(laser.pos.x, tuning.field_width);
        laser.pos.y = wrap_zero_margin(laser.pos.y, tuning.field_height);
    }
}

//! Drafting.
//!
//! A rider with another racing rider on the very next tile is drafting:
//! it slides forward one tile after movement when there is room, and it
//! is spared fatigue.

use crate::core::{GameState, Position, RaceEvent, RiderSlot};

use super::lanes::Occupancy;

/// True when a racing rider occupies the tile directly ahead.
#[must_use]
pub fn is_drafting(state: &GameState, slot: RiderSlot) -> bool {
    let ahead = state.rider_at(slot).position.track_position + 1;
    state
        .riders()
        .any(|r| r.is_racing() && r.position.track_position == ahead)
}

/// Slide every drafting rider forward one tile, in listing order.
///
/// Each rider is checked against the positions left by the riders before
/// it, so a pack can roll forward in a single pass. Returns the number of
/// riders that moved.
pub fn slipstream_pass(state: &mut GameState) -> usize {
    let mut moved = 0;

    for slot in state.racing_slots() {
        if !is_drafting(state, slot) {
            continue;
        }

        let ahead = state.rider_at(slot).position.track_position + 1;
        let free = Occupancy::of_state(state, None).free_lanes(&state.track, ahead);
        let Some(lane) = state.rng.choose(free.as_slice()).copied() else {
            continue;
        };

        let rider = state.rider_at_mut(slot);
        rider.position = Position::new(ahead, lane);
        let name = rider.name.clone();
        state.record(RaceEvent::Slipstreamed(name));
        moved += 1;
    }

    moved
}

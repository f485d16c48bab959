//! Lane occupancy and blocking.
//!
//! A tile holds at most `lanes` riders side by side. A moving rider stops
//! short of the first full tile on its way, then takes a random free lane
//! on the tile it reaches.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::core::{GameState, Position, RaceEvent, RiderId, RiderSlot};
use crate::track::Track;

/// Lane indices on one tile.
pub type Lanes = SmallVec<[u8; 4]>;

/// Lanes taken on each tile by racing riders.
#[derive(Clone, Debug, Default)]
pub struct Occupancy {
    tiles: FxHashMap<usize, Lanes>,
}

impl Occupancy {
    /// Occupancy of every racing rider except `exclude`.
    #[must_use]
    pub fn of_state(state: &GameState, exclude: Option<RiderId>) -> Self {
        let mut occupancy = Self::default();
        for rider in state.riders() {
            if rider.is_racing() && Some(rider.id) != exclude {
                occupancy.insert(rider.position);
            }
        }
        occupancy
    }

    /// Mark a lane as taken.
    pub fn insert(&mut self, position: Position) {
        self.tiles
            .entry(position.track_position)
            .or_default()
            .push(position.lane);
    }

    /// Riders on a tile.
    #[must_use]
    pub fn count(&self, track_position: usize) -> usize {
        self.tiles.get(&track_position).map_or(0, SmallVec::len)
    }

    /// True when a tile has no room left.
    #[must_use]
    pub fn is_full(&self, track: &Track, track_position: usize) -> bool {
        self.count(track_position) >= usize::from(track.lanes_at(track_position))
    }

    /// Unoccupied lanes of a tile, in lane order.
    #[must_use]
    pub fn free_lanes(&self, track: &Track, track_position: usize) -> Lanes {
        let taken = self.tiles.get(&track_position);
        (0..track.lanes_at(track_position))
            .filter(|lane| taken.map_or(true, |t| !t.contains(lane)))
            .collect()
    }
}

/// Where a move can legally end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovePlan {
    /// Farthest reachable tile.
    pub target: usize,
    /// The full tile that stopped the rider short, if any.
    pub blocked_at: Option<usize>,
}

/// Find the farthest tile a rider at `current` can reach with `distance`.
///
/// The first full tile after `current` caps the move to the tile before it.
#[must_use]
pub fn plan_move(track: &Track, occupancy: &Occupancy, current: usize, distance: u32) -> MovePlan {
    let distance = usize::try_from(distance).unwrap_or(usize::MAX);
    let uncapped = track.clamp(current.saturating_add(distance));

    match (current + 1..=uncapped).find(|&pos| occupancy.is_full(track, pos)) {
        Some(full) => MovePlan {
            target: full - 1,
            blocked_at: Some(full),
        },
        None => MovePlan {
            target: uncapped,
            blocked_at: None,
        },
    }
}

/// Result of resolving one rider's move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved(Position),
    /// Blocked on the very next tile; the rider keeps its lane.
    Held,
    /// No free lane at the target. The rider stays put.
    Stalled,
}

/// Move the rider at `slot` up to `distance` tiles, logging what happens.
///
/// A rider reaching the last tile is marked finished.
pub fn move_rider(state: &mut GameState, slot: RiderSlot, distance: u32) -> MoveOutcome {
    let (id, name, current) = {
        let rider = state.rider_at(slot);
        (rider.id, rider.name.clone(), rider.position.track_position)
    };
    let occupancy = Occupancy::of_state(state, Some(id));
    let plan = plan_move(&state.track, &occupancy, current, distance);

    if let Some(position) = plan.blocked_at {
        state.record(RaceEvent::Blocked {
            rider: name.clone(),
            position,
        });
    }

    let outcome = if plan.target == current {
        state.record(RaceEvent::HeldPosition(name.clone()));
        MoveOutcome::Held
    } else {
        let free = occupancy.free_lanes(&state.track, plan.target);
        match state.rng.choose(free.as_slice()).copied() {
            Some(lane) => {
                let position = Position::new(plan.target, lane);
                state.rider_at_mut(slot).position = position;
                state.record(RaceEvent::Moved {
                    rider: name.clone(),
                    position: plan.target,
                    lane,
                });
                MoveOutcome::Moved(position)
            }
            None => {
                log::warn!("{name} has no free lane at position {}", plan.target);
                state.record(RaceEvent::CannotMove(name.clone()));
                MoveOutcome::Stalled
            }
        }
    };

    if state.rider_at(slot).position.track_position >= state.track.finish_index() {
        state.rider_at_mut(slot).finished = true;
        state.record(RaceEvent::Finished(name));
    }

    outcome
}

//! Race state.
//!
//! ## GameState
//!
//! Complete race state:
//! - Teams, their riders and decks
//! - Track and race weather
//! - Turn number and current phase
//! - Finish order and the append-only race log
//! - RNG
//!
//! The whole value serializes to a single JSON document. The log is an
//! `im::Vector`, so cloning a state is cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::HandComposition;
use super::entity::{RaceId, RiderId};
use super::error::RaceError;
use super::event::RaceEvent;
use super::phase::Phase;
use super::rider::{Rider, Team};
use super::rng::GameRng;
use crate::track::{Track, Weather};

/// Index of a rider: `(team index, rider index within the team)`.
pub type RiderSlot = (usize, usize);

/// Full state of one race.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub id: RaceId,
    pub teams: Vec<Team>,
    pub track: Track,
    /// Starts at 1.
    pub current_turn: u32,
    pub current_phase: Phase,
    pub weather: Weather,
    /// Finished riders in finish order.
    pub finished_riders: Vec<RiderId>,
    pub game_log: Vector<String>,
    /// Cards dealt to each rider on every redraw.
    pub hand: HandComposition,
    pub rng: GameRng,
}

impl GameState {
    /// An empty race on turn 1, waiting for card selection.
    #[must_use]
    pub fn new(
        id: RaceId,
        track: Track,
        weather: Weather,
        hand: HandComposition,
        rng: GameRng,
    ) -> Self {
        Self {
            id,
            teams: Vec::new(),
            track,
            current_turn: 1,
            current_phase: Phase::CardSelection,
            weather,
            finished_riders: Vec::new(),
            game_log: Vector::new(),
            hand,
            rng,
        }
    }

    // === Riders ===

    /// Every rider slot in listing order: team order, then rider order.
    #[must_use]
    pub fn slots(&self) -> Vec<RiderSlot> {
        self.teams
            .iter()
            .enumerate()
            .flat_map(|(t, team)| (0..team.riders.len()).map(move |r| (t, r)))
            .collect()
    }

    /// Slots of riders still racing, in listing order.
    #[must_use]
    pub fn racing_slots(&self) -> Vec<RiderSlot> {
        self.slots()
            .into_iter()
            .filter(|&slot| self.rider_at(slot).is_racing())
            .collect()
    }

    /// All riders in listing order.
    pub fn riders(&self) -> impl Iterator<Item = &Rider> {
        self.teams.iter().flat_map(|team| team.riders.iter())
    }

    /// Rider at a slot.
    ///
    /// Panics on an out-of-range slot; slots come from `slots()`.
    #[must_use]
    pub fn rider_at(&self, (team, rider): RiderSlot) -> &Rider {
        &self.teams[team].riders[rider]
    }

    /// Mutable rider at a slot.
    pub fn rider_at_mut(&mut self, (team, rider): RiderSlot) -> &mut Rider {
        &mut self.teams[team].riders[rider]
    }

    /// Find the slot of a rider.
    #[must_use]
    pub fn locate(&self, id: RiderId) -> Option<RiderSlot> {
        self.teams.iter().enumerate().find_map(|(t, team)| {
            team.riders
                .iter()
                .position(|r| r.id == id)
                .map(|r| (t, r))
        })
    }

    /// Look up a rider by id.
    #[must_use]
    pub fn rider(&self, id: RiderId) -> Option<&Rider> {
        self.teams.iter().find_map(|team| team.rider(id))
    }

    /// True when every racing rider has a played card.
    #[must_use]
    pub fn all_selected(&self) -> bool {
        self.riders()
            .filter(|r| r.is_racing())
            .all(|r| r.played_card.is_some())
    }

    /// Number of riders that have crossed the line.
    #[must_use]
    pub fn finished_count(&self) -> usize {
        self.riders().filter(|r| r.finished).count()
    }

    // === Log ===

    /// Append an event to the race log.
    pub fn record(&mut self, event: RaceEvent) {
        let line = event.to_string();
        log::debug!("race {}: {line}", self.id);
        self.game_log.push_back(line);
    }

    // === Phases ===

    /// Move to the next phase, checked against the phase cycle.
    pub fn advance(&mut self, next: Phase) -> Result<(), RaceError> {
        let current = self.current_phase;
        if !current.can_advance_to(next) {
            return Err(RaceError::IllegalMove(format!(
                "phase {current} cannot advance to {next}"
            )));
        }
        log::info!("race {} turn {}: {current} -> {next}", self.id, self.current_turn);
        self.current_phase = next;
        Ok(())
    }

    /// True once the race is over.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.current_phase.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::TeamDecks;
    use crate::core::{Control, DeckConfig, IdAllocator, Position, TeamId};

    fn state() -> GameState {
        let mut ids = IdAllocator::default();
        let mut rng = GameRng::new(1);
        let mut state = GameState::new(
            RaceId::generate(),
            Track::the_peaks(),
            Weather::None,
            HandComposition::default(),
            GameRng::new(1),
        );
        for name in ["A", "B"] {
            let id: TeamId = ids.team();
            let riders = (0..2)
                .map(|i| {
                    Rider::new(
                        ids.rider(),
                        format!("{name}{i}"),
                        id,
                        Control::Human,
                        Position::new(0, i as u8),
                    )
                })
                .collect();
            state.teams.push(Team {
                id,
                name: name.into(),
                riders,
                decks: TeamDecks::build(&DeckConfig::default(), &mut ids, &mut rng),
            });
        }
        state
    }

    #[test]
    fn test_new_state() {
        let state = GameState::new(
            RaceId::generate(),
            Track::the_peaks(),
            Weather::Headwind,
            HandComposition::default(),
            GameRng::new(0),
        );
        assert_eq!(state.current_turn, 1);
        assert_eq!(state.current_phase, Phase::CardSelection);
        assert!(state.game_log.is_empty());
        assert!(!state.is_over());
    }

    #[test]
    fn test_listing_order() {
        let state = state();
        assert_eq!(state.slots(), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);

        let names: Vec<_> = state.riders().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["A0", "A1", "B0", "B1"]);
    }

    #[test]
    fn test_locate() {
        let mut state = state();
        let id = state.teams[1].riders[0].id;
        assert_eq!(state.locate(id), Some((1, 0)));
        assert_eq!(state.rider(id).map(|r| r.name.as_str()), Some("B0"));
        assert_eq!(state.locate(RiderId(999)), None);

        state.rider_at_mut((1, 0)).finished = true;
        assert_eq!(state.racing_slots(), vec![(0, 0), (0, 1), (1, 1)]);
        assert_eq!(state.finished_count(), 1);
    }

    #[test]
    fn test_advance_follows_cycle() {
        let mut state = state();
        state.advance(Phase::Movement).unwrap();
        state.advance(Phase::Slipstream).unwrap();

        let err = state.advance(Phase::CardSelection).unwrap_err();
        assert!(matches!(err, RaceError::IllegalMove(_)));
        assert_eq!(state.current_phase, Phase::Slipstream);

        state.advance(Phase::Fatigue).unwrap();
        state.advance(Phase::GameOver).unwrap();
        assert!(state.is_over());
        assert!(state.advance(Phase::CardSelection).is_err());
    }

    #[test]
    fn test_record_appends() {
        let mut state = state();
        state.record(RaceEvent::HeldPosition("A0".into()));
        state.record(RaceEvent::Finished("B1".into()));

        assert_eq!(state.game_log.len(), 2);
        assert_eq!(state.game_log[0], "A0 holds position");
        assert_eq!(state.game_log[1], "B1 finished the race!");
    }

    #[test]
    fn test_json_round_trip_keeps_rng_stream() {
        let mut state = state();
        state.rng.gen_range_usize(0..10);

        let json = serde_json::to_string(&state).unwrap();
        let mut restored: GameState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.id, state.id);
        assert_eq!(restored.slots(), state.slots());
        assert_eq!(
            restored.rng.gen_range_usize(0..1000),
            state.rng.gen_range_usize(0..1000)
        );
        assert!(json.contains("\"current_phase\":\"card_selection\""));
    }
}

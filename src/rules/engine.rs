//! The race engine: race creation, card selection, and phase processing.
//!
//! `RaceEngine` owns the configuration and the card policy used for
//! scripted riders. It never holds race state; every operation takes the
//! `GameState` it works on.
//!
//! ## Phases
//!
//! `process_step` runs every phase it can reach without a human:
//!
//! - `card_selection`: scripted riders pick cards. Stops here while a
//!   human rider still has to choose.
//! - `movement`: riders move in initiative order.
//! - `slipstream`: drafting riders slide forward.
//! - `fatigue`: penalties and redraw, then either the next turn or the
//!   end of the race. Processing always stops after this phase.
//! - `game_over`: nothing happens.

use serde::{Deserialize, Serialize};

use crate::ai::{CardPolicy, ScriptedPolicy};
use crate::cards::TeamDecks;
use crate::core::{
    rider_name, CardId, Control, GameRng, GameState, IdAllocator, Phase, Position, RaceConfig,
    RaceError, RaceEvent, RaceId, Rider, RiderId, RiderSlot, Team, TEAM_COLORS,
};

use super::fatigue::fatigue_pass;
use super::lanes::move_rider;
use super::movement::movement;
use super::slipstream::slipstream_pass;

/// What one call to [`RaceEngine::process_step`] did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Phase the race stopped in.
    pub phase: Phase,
    pub turn: u32,
    /// Log lines added during the step.
    pub events: Vec<String>,
}

/// Race rules bound to a configuration and a policy for scripted riders.
///
/// ## Usage
///
/// ```
/// use peloton::core::{Phase, RaceConfig};
/// use peloton::rules::RaceEngine;
///
/// let engine = RaceEngine::new(RaceConfig::new(42).with_human_teams(0));
/// let mut state = engine.new_race(&["Blue", "Red"]).unwrap();
///
/// let report = engine.process_step(&mut state).unwrap();
/// assert_eq!(report.turn, 2);
/// assert_eq!(report.phase, Phase::CardSelection);
/// ```
#[derive(Clone, Debug)]
pub struct RaceEngine<P = ScriptedPolicy> {
    config: RaceConfig,
    policy: P,
}

impl RaceEngine<ScriptedPolicy> {
    /// Engine with the default scripted policy.
    #[must_use]
    pub fn new(config: RaceConfig) -> Self {
        Self::with_policy(config, ScriptedPolicy::default())
    }
}

impl Default for RaceEngine<ScriptedPolicy> {
    fn default() -> Self {
        Self::new(RaceConfig::default())
    }
}

impl<P: CardPolicy> RaceEngine<P> {
    /// Engine with a custom policy for scripted riders.
    #[must_use]
    pub fn with_policy(config: RaceConfig, policy: P) -> Self {
        Self { config, policy }
    }

    // === Creation ===

    /// Set up a race with one team per name.
    ///
    /// The first `human_teams` teams are human-controlled, the rest are
    /// scripted. Riders line up on the first tile, alternating lanes.
    /// Decks are shuffled and first hands dealt.
    pub fn new_race<S: AsRef<str>>(&self, team_names: &[S]) -> Result<GameState, RaceError> {
        if team_names.is_empty() {
            return Err(RaceError::NoTeams);
        }

        let config = &self.config;
        let rng = GameRng::new(config.seed.unwrap_or_else(rand::random));
        let mut deal = rng.for_context("deal");
        let mut state = GameState::new(
            RaceId::generate(),
            config.track.clone(),
            config.weather,
            config.hand,
            rng,
        );
        let mut ids = IdAllocator::default();
        let start_lanes = usize::from(state.track.lanes_at(0).max(1));

        for (index, name) in team_names.iter().enumerate() {
            let name = name.as_ref();
            let team_id = ids.team();
            let control = if index < config.human_teams {
                Control::Human
            } else {
                Control::Scripted
            };
            let color = TEAM_COLORS[index % TEAM_COLORS.len()];

            let riders = (0..config.riders_per_team)
                .map(|r| {
                    let lane = u8::try_from(r % start_lanes).unwrap_or(0);
                    Rider::new(
                        ids.rider(),
                        rider_name(name, r),
                        team_id,
                        control,
                        Position::new(0, lane),
                    )
                    .with_color(color)
                })
                .collect();

            let mut team = Team {
                id: team_id,
                name: name.to_owned(),
                riders,
                decks: TeamDecks::build(&config.decks, &mut ids, &mut deal),
            };
            for rider in 0..team.riders.len() {
                team.draw(rider, config.hand, &mut deal);
            }
            state.teams.push(team);
        }

        log::info!(
            "created race {} on {} with {} teams, seed {}",
            state.id,
            state.track.name,
            state.teams.len(),
            state.rng.seed()
        );
        Ok(state)
    }

    // === Card selection ===

    /// Play a card from a rider's hand.
    ///
    /// Choosing again before movement returns the earlier card to the hand.
    /// Moves the race to `movement` once every racing rider has a card.
    /// On error the state is untouched.
    pub fn select_card(
        &self,
        state: &mut GameState,
        rider: RiderId,
        card: CardId,
    ) -> Result<(), RaceError> {
        if state.current_phase != Phase::CardSelection {
            return Err(RaceError::InvalidPhase {
                expected: Phase::CardSelection,
                actual: state.current_phase,
            });
        }
        let slot = state.locate(rider).ok_or(RaceError::RiderNotFound(rider))?;
        if state.rider_at(slot).finished {
            return Err(RaceError::RiderFinished(rider));
        }
        let index = state
            .rider_at(slot)
            .hand_index(card)
            .ok_or(RaceError::CardNotInHand { rider, card })?;

        self.play(state, slot, index, false);

        if state.all_selected() {
            state.advance(Phase::Movement)?;
        }
        Ok(())
    }

    fn play(&self, state: &mut GameState, slot: RiderSlot, index: usize, scripted: bool) {
        let rider = state.rider_at_mut(slot);
        let card = rider.play_from_hand(index);
        let event = RaceEvent::CardPlayed {
            rider: rider.name.clone(),
            family: card.family,
            value: card.value,
            scripted,
        };
        state.record(event);
    }

    /// Pick cards for scripted riders that still need one.
    fn auto_select(&self, state: &mut GameState) {
        for slot in state.racing_slots() {
            let rider = state.rider_at(slot);
            if !rider.is_scripted() || rider.played_card.is_some() {
                continue;
            }

            let choice = self
                .policy
                .choose(rider, &state.track)
                .and_then(|card| rider.hand_index(card));
            match choice {
                Some(index) => self.play(state, slot, index, true),
                None => {
                    let name = rider.name.clone();
                    log::warn!("{name} has no card to play, race {} stalls", state.id);
                    state.record(RaceEvent::NoCardToPlay(name));
                }
            }
        }
    }

    // === Processing ===

    /// Run the race forward as far as it can go without a human.
    ///
    /// Stops while waiting for human card choices, after the fatigue phase
    /// of a turn, or at `game_over`. A finished race is left untouched.
    pub fn process_step(&self, state: &mut GameState) -> Result<StepReport, RaceError> {
        let first_new = state.game_log.len();

        loop {
            match state.current_phase {
                Phase::CardSelection => {
                    self.auto_select(state);
                    if !state.all_selected() {
                        break;
                    }
                    state.advance(Phase::Movement)?;
                }
                Phase::Movement => {
                    self.movement_phase(state)?;
                    state.advance(Phase::Slipstream)?;
                }
                Phase::Slipstream => {
                    slipstream_pass(state);
                    state.advance(Phase::Fatigue)?;
                }
                Phase::Fatigue => {
                    fatigue_pass(state);
                    self.end_turn(state)?;
                    break;
                }
                Phase::GameOver => break,
            }
        }

        Ok(StepReport {
            phase: state.current_phase,
            turn: state.current_turn,
            events: state.game_log.iter().skip(first_new).cloned().collect(),
        })
    }

    /// Move riders in descending card value. Equal values are ordered by
    /// a random key from the race RNG.
    fn movement_phase(&self, state: &mut GameState) -> Result<(), RaceError> {
        let mut order: Vec<(u8, f64, RiderSlot)> = Vec::new();
        for slot in state.racing_slots() {
            if let Some(card) = state.rider_at(slot).played_card {
                let key = state.rng.gen_unit();
                order.push((card.value, key, slot));
            }
        }
        order.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.total_cmp(&a.1)));

        for (_, _, slot) in order {
            let rider = state.rider_at(slot);
            let (Some(card), true) = (rider.played_card, rider.is_racing()) else {
                continue;
            };
            let position = rider.position.track_position;
            let tile = state.track.tile(position).ok_or_else(|| {
                RaceError::IllegalMove(format!("{} is off the track at {position}", rider.name))
            })?;
            let distance = movement(&card, tile, state.weather);
            move_rider(state, slot, distance);
        }
        Ok(())
    }

    /// Close the turn: rank any new finishers and end the race, or start
    /// the next turn.
    fn end_turn(&self, state: &mut GameState) -> Result<(), RaceError> {
        if state.finished_count() == 0 {
            state.advance(Phase::CardSelection)?;
            state.current_turn += 1;
            return Ok(());
        }

        for slot in state.slots() {
            let next_rank = u32::try_from(state.finished_riders.len() + 1)
                .map_err(|_| RaceError::IllegalMove("too many finishers".into()))?;
            let rider = state.rider_at_mut(slot);
            if rider.finished && rider.finish_rank.is_none() {
                rider.finish_rank = Some(next_rank);
                let id = rider.id;
                state.finished_riders.push(id);
            }
        }

        state.advance(Phase::GameOver)?;
        if let Some(winner) = state.finished_riders.first().and_then(|&id| state.rider(id)) {
            log::info!("race {} won by {}", state.id, winner.name);
        }
        Ok(())
    }
}

//! End-of-turn fatigue and hand redraw.

use crate::core::{GameState, RaceEvent};

use super::slipstream::is_drafting;

/// Penalize riders that are not drafting, then deal every racing rider a
/// fresh hand.
///
/// Drafting only spares the penalty; every racing rider redraws. The
/// played card goes to its discard pile first. Returns the number of
/// fatigue cards granted.
pub fn fatigue_pass(state: &mut GameState) -> usize {
    let mut granted = 0;

    for slot in state.racing_slots() {
        let (team, rider) = slot;
        let drafting = is_drafting(state, slot);

        if !drafting && state.teams[team].grant_fatigue(rider) {
            let name = state.rider_at(slot).name.clone();
            state.record(RaceEvent::Fatigued(name));
            granted += 1;
        }

        let hand = state.hand;
        let GameState { teams, rng, .. } = &mut *state;
        teams[team].discard_played(rider);
        teams[team].draw(rider, hand, rng);
    }

    granted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Position, RaceConfig};
    use crate::rules::RaceEngine;
    use crate::zones::CardCensus;

    fn race() -> GameState {
        let mut state = RaceEngine::new(RaceConfig::new(9))
            .new_race(&["A", "B"])
            .unwrap();
        for (i, slot) in state.slots().into_iter().enumerate() {
            state.rider_at_mut(slot).position = Position::new(2 + 3 * i, 0);
        }
        state
    }

    #[test]
    fn test_lone_riders_get_fatigue() {
        let mut state = race();

        let granted = fatigue_pass(&mut state);

        assert_eq!(granted, 4);
        assert!(state.riders().all(|r| r.fatigue_count == 1));
        assert_eq!(state.teams[0].decks.fatigue.len(), 18);
        assert!(state
            .game_log
            .iter()
            .any(|line| line == "A Rouleur receives fatigue card"));
    }

    #[test]
    fn test_drafting_rider_is_spared() {
        let mut state = race();
        state.rider_at_mut((0, 0)).position = Position::new(4, 0);

        fatigue_pass(&mut state);

        // A Sprinteur sits right behind A Rouleur on 5.
        assert_eq!(state.rider_at((0, 0)).fatigue_count, 0);
        assert_eq!(state.rider_at((0, 1)).fatigue_count, 1);
    }

    #[test]
    fn test_played_card_discarded_and_hand_redrawn() {
        let mut state = race();
        let card = state.rider_at_mut((0, 0)).play_from_hand(0);

        fatigue_pass(&mut state);

        let rider = state.rider_at((0, 0));
        assert!(rider.played_card.is_none());
        assert_eq!(rider.hand.len(), 4);
        assert!(rider.hand.iter().all(|c| !c.is_fatigue()));

        let pile = state.teams[0].decks.pile(card.family).unwrap();
        assert!(pile.discard_pile().iter().any(|c| c.id == card.id));
    }

    #[test]
    fn test_granted_fatigue_leaves_circulation() {
        let mut state = race();

        fatigue_pass(&mut state);

        for team in &state.teams {
            let census = CardCensus::of_team(team);
            assert!(census.duplicates().is_empty());
            assert_eq!(census.total(), 40 - 2);
            assert_eq!(census.fatigue_cards(), 18);
        }
    }

    #[test]
    fn test_empty_fatigue_stack_is_quiet() {
        let mut state = race();
        for team in &mut state.teams {
            team.decks.fatigue.clear();
        }
        let before = state.game_log.len();

        assert_eq!(fatigue_pass(&mut state), 0);
        assert_eq!(state.game_log.len(), before);
        assert!(state.riders().all(|r| r.fatigue_count == 0));
    }

    #[test]
    fn test_finished_riders_are_skipped() {
        let mut state = race();
        state.rider_at_mut((1, 1)).finished = true;
        let hand: Vec<_> = state.rider_at((1, 1)).hand.iter().map(|c| c.id).collect();

        fatigue_pass(&mut state);

        let rider = state.rider_at((1, 1));
        assert_eq!(rider.fatigue_count, 0);
        assert_eq!(rider.hand.iter().map(|c| c.id).collect::<Vec<_>>(), hand);
    }
}

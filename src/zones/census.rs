//! Census of where a team's cards are.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardFamily};
use crate::core::{CardId, RiderId, Team};

/// A card container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Undrawn cards of a recycled family.
    Stack(CardFamily),
    /// Discarded cards of a recycled family.
    Discard(CardFamily),
    /// Undrawn fatigue cards.
    FatigueStack,
    Hand(RiderId),
    Played(RiderId),
}

/// Card locations for one team.
///
/// ## Usage
///
/// ```
/// use peloton::core::RaceConfig;
/// use peloton::rules::RaceEngine;
/// use peloton::zones::{CardCensus, Zone};
///
/// let engine = RaceEngine::new(RaceConfig::new(1));
/// let state = engine.new_race(&["A"]).unwrap();
/// let team = &state.teams[0];
///
/// let census = CardCensus::of_team(team);
/// assert!(census.duplicates().is_empty());
/// assert_eq!(census.total(), 40);
/// assert_eq!(census.zone_size(Zone::Hand(team.riders[0].id)), 4);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCensus {
    /// card -> zone
    locations: FxHashMap<CardId, Zone>,
    counts: FxHashMap<Zone, usize>,
    /// Cards found in more than one place.
    duplicates: Vec<CardId>,
    fatigue: usize,
}

impl CardCensus {
    /// Walk every container of a team.
    #[must_use]
    pub fn of_team(team: &Team) -> Self {
        let mut census = Self::default();

        for family in CardFamily::RECYCLED {
            if let Some(pile) = team.decks.pile(family) {
                census.record_all(pile.draw_stack(), Zone::Stack(family));
                census.record_all(pile.discard_pile(), Zone::Discard(family));
            }
        }
        census.record_all(&team.decks.fatigue, Zone::FatigueStack);

        for rider in &team.riders {
            census.record_all(&rider.hand, Zone::Hand(rider.id));
            if let Some(card) = &rider.played_card {
                census.record(card, Zone::Played(rider.id));
            }
        }

        census
    }

    fn record_all(&mut self, cards: &[Card], zone: Zone) {
        for card in cards {
            self.record(card, zone);
        }
    }

    fn record(&mut self, card: &Card, zone: Zone) {
        if self.locations.insert(card.id, zone).is_some() {
            self.duplicates.push(card.id);
        }
        *self.counts.entry(zone).or_default() += 1;
        if card.is_fatigue() {
            self.fatigue += 1;
        }
    }

    /// Get the zone a card is in.
    #[must_use]
    pub fn get_zone(&self, card: CardId) -> Option<Zone> {
        self.locations.get(&card).copied()
    }

    /// Number of cards in a zone.
    #[must_use]
    pub fn zone_size(&self, zone: Zone) -> usize {
        self.counts.get(&zone).copied().unwrap_or(0)
    }

    /// Number of card slots counted, duplicates included.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of fatigue cards anywhere in the team.
    #[must_use]
    pub fn fatigue_cards(&self) -> usize {
        self.fatigue
    }

    /// Cards seen in more than one container. Empty when consistent.
    #[must_use]
    pub fn duplicates(&self) -> &[CardId] {
        &self.duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{HandComposition, RaceConfig};
    use crate::rules::RaceEngine;

    #[test]
    fn test_fresh_team_census() {
        let engine = RaceEngine::new(RaceConfig::new(42));
        let state = engine.new_race(&["A", "B"]).unwrap();

        for team in &state.teams {
            let census = CardCensus::of_team(team);
            assert!(census.duplicates().is_empty());
            assert_eq!(census.total(), 40);
            assert_eq!(census.zone_size(Zone::FatigueStack), 20);
            assert_eq!(census.fatigue_cards(), 20);
            assert_eq!(census.zone_size(Zone::Stack(CardFamily::Sprinteur)), 6);
            assert_eq!(census.zone_size(Zone::Stack(CardFamily::Rouleur)), 6);
            for rider in &team.riders {
                assert_eq!(census.zone_size(Zone::Hand(rider.id)), 4);
                assert_eq!(census.zone_size(Zone::Played(rider.id)), 0);
            }
        }
    }

    #[test]
    fn test_played_card_is_located() {
        let engine = RaceEngine::new(RaceConfig::new(42));
        let mut state = engine.new_race(&["A"]).unwrap();
        let rider = &mut state.teams[0].riders[0];
        let card = rider.play_from_hand(0);
        let id = rider.id;

        let census = CardCensus::of_team(&state.teams[0]);
        assert_eq!(census.get_zone(card.id), Some(Zone::Played(id)));
        assert_eq!(census.total(), 40);
    }

    #[test]
    fn test_duplicate_detected() {
        let engine = RaceEngine::new(RaceConfig::new(42).with_hand(HandComposition {
            sprinteur: 1,
            rouleur: 0,
        }));
        let mut state = engine.new_race(&["A"]).unwrap();
        let team = &mut state.teams[0];
        let copied = team.riders[0].hand[0];
        team.riders[1].hand.push(copied);

        let census = CardCensus::of_team(team);
        assert_eq!(census.duplicates(), &[copied.id]);
    }
}

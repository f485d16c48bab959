//! Card selection policies.

use std::cmp::Reverse;
use std::ops::RangeInclusive;

use crate::cards::Card;
use crate::core::{CardId, Rider};
use crate::track::{Terrain, Track};

/// Picks the card a scripted rider plays this turn.
pub trait CardPolicy: Send + Sync {
    /// Choose a card from the rider's hand. `None` when there is nothing
    /// to play.
    fn choose(&self, rider: &Rider, track: &Track) -> Option<CardId>;
}

/// Default heuristic.
///
/// - Far from the line: the highest card.
/// - On a climb: the first card in the mountain band, else the lowest.
/// - Otherwise: the middle of the hand by value.
///
/// Ties go to the card that comes first in the hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptedPolicy {
    /// Track length minus position above which the rider goes all out.
    pub far_threshold: usize,
    /// Card values preferred on mountain tiles.
    pub mountain_band: RangeInclusive<u8>,
}

impl Default for ScriptedPolicy {
    fn default() -> Self {
        Self {
            far_threshold: 15,
            mountain_band: 3..=5,
        }
    }
}

impl ScriptedPolicy {
    fn highest(hand: &[Card]) -> Option<&Card> {
        hand.iter().min_by_key(|c| Reverse(c.value))
    }

    fn lowest(hand: &[Card]) -> Option<&Card> {
        hand.iter().min_by_key(|c| c.value)
    }

    fn middle(hand: &[Card]) -> Option<&Card> {
        let mut sorted: Vec<&Card> = hand.iter().collect();
        sorted.sort_by_key(|c| c.value);
        sorted.get(sorted.len() / 2).copied()
    }
}

impl CardPolicy for ScriptedPolicy {
    fn choose(&self, rider: &Rider, track: &Track) -> Option<CardId> {
        let hand = rider.hand.as_slice();
        let position = rider.position.track_position;
        let remaining = track.length().saturating_sub(position);
        let on_climb = track
            .tile(position)
            .is_some_and(|tile| tile.terrain == Terrain::Mountain);

        let card = if remaining > self.far_threshold {
            Self::highest(hand)
        } else if on_climb {
            hand.iter()
                .find(|c| self.mountain_band.contains(&c.value))
                .or_else(|| Self::lowest(hand))
        } else {
            Self::middle(hand)
        };

        card.map(|c| c.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardFamily;
    use crate::core::{Control, Position, RiderId, TeamId};

    fn rider_at(position: usize, values: &[u8]) -> Rider {
        let mut rider = Rider::new(
            RiderId(1),
            "Bot",
            TeamId(0),
            Control::Scripted,
            Position::new(position, 0),
        );
        for (i, &value) in values.iter().enumerate() {
            rider
                .hand
                .push(Card::new(CardId(100 + i as u32), CardFamily::Rouleur, value));
        }
        rider
    }

    fn choose(position: usize, values: &[u8]) -> Option<CardId> {
        ScriptedPolicy::default().choose(&rider_at(position, values), &Track::the_peaks())
    }

    #[test]
    fn test_empty_hand() {
        assert_eq!(choose(0, &[]), None);
    }

    #[test]
    fn test_far_from_finish_plays_highest() {
        // 27 - 10 = 17
        assert_eq!(choose(10, &[3, 9, 4, 2]), Some(CardId(101)));
    }

    #[test]
    fn test_highest_tie_takes_first() {
        assert_eq!(choose(0, &[7, 2, 7]), Some(CardId(100)));
    }

    #[test]
    fn test_far_counts_from_track_length() {
        // 27 - 11 = 16, still far although the tile is a climb
        assert_eq!(choose(11, &[9, 2, 4, 3]), Some(CardId(100)));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // 27 - 12 = 15, on a climb
        assert_eq!(choose(12, &[9, 2, 4, 3]), Some(CardId(102)));
    }

    #[test]
    fn test_climb_prefers_band() {
        assert_eq!(choose(12, &[9, 6, 5, 3]), Some(CardId(102)));
    }

    #[test]
    fn test_climb_without_band_plays_lowest() {
        assert_eq!(choose(12, &[9, 2, 7, 2]), Some(CardId(101)));
    }

    #[test]
    fn test_flat_plays_middle() {
        // sorted: 2 3 5 9 -> index 2 is the 5
        assert_eq!(choose(20, &[9, 2, 5, 3]), Some(CardId(102)));
        // sorted: 2 4 9 -> index 1 is the 4
        assert_eq!(choose(20, &[9, 4, 2]), Some(CardId(101)));
    }

    #[test]
    fn test_custom_threshold() {
        let policy = ScriptedPolicy {
            far_threshold: 30,
            ..ScriptedPolicy::default()
        };
        let rider = rider_at(0, &[9, 2, 5, 3]);
        // never "far", start tile is flat
        assert_eq!(policy.choose(&rider, &Track::the_peaks()), Some(CardId(102)));
    }
}

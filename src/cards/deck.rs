//! Per-team decks: draw stacks, discard piles, and the fatigue stack.
//!
//! Draw stacks are plain `Vec`s with the top at the end. Cards are moved
//! by value between stacks, discard piles, and hands, never copied, so a
//! card is always in exactly one place.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::definition::{Card, CardFamily};
use crate::core::config::{DeckConfig, HandComposition};
use crate::core::{GameRng, IdAllocator};

/// Cards held by a rider. Small enough to stay inline in the common case.
pub type Hand = SmallVec<[Card; 6]>;

/// Draw stack and discard pile for one recycled family.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FamilyPile {
    family: CardFamily,
    /// Top of the stack is the end of the vec.
    draw: Vec<Card>,
    discard: Vec<Card>,
}

impl FamilyPile {
    /// Create a pile whose draw stack holds `cards` in the given order.
    #[must_use]
    pub fn new(family: CardFamily, cards: Vec<Card>) -> Self {
        Self {
            family,
            draw: cards,
            discard: Vec::new(),
        }
    }

    /// Family served by this pile.
    #[must_use]
    pub fn family(&self) -> CardFamily {
        self.family
    }

    /// Cards left in the draw stack, bottom first.
    #[must_use]
    pub fn draw_stack(&self) -> &[Card] {
        &self.draw
    }

    /// Cards in the discard pile, oldest first.
    #[must_use]
    pub fn discard_pile(&self) -> &[Card] {
        &self.discard
    }

    /// Total cards held by this pile.
    #[must_use]
    pub fn len(&self) -> usize {
        self.draw.len() + self.discard.len()
    }

    /// True when both the stack and the discard pile are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shuffle the discard pile into a new draw stack.
    ///
    /// Any cards still in the draw stack stay on top.
    pub fn reshuffle(&mut self, rng: &mut GameRng) {
        let mut recycled = std::mem::take(&mut self.discard);
        rng.shuffle(&mut recycled);
        recycled.append(&mut self.draw);
        self.draw = recycled;
    }

    /// Pop the top card, reshuffling the discard pile first if the stack
    /// is empty. Returns `None` once both are exhausted.
    pub fn draw(&mut self, rng: &mut GameRng) -> Option<Card> {
        if self.draw.is_empty() && !self.discard.is_empty() {
            log::debug!("reshuffling {} {} discards", self.discard.len(), self.family);
            self.reshuffle(rng);
        }
        self.draw.pop()
    }

    /// Put a card on the discard pile.
    pub fn discard(&mut self, card: Card) {
        debug_assert_eq!(card.family, self.family);
        self.discard.push(card);
    }
}

/// All cards a team owns that are not in a rider's hand or played slot.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TeamDecks {
    pub sprinteur: FamilyPile,
    pub rouleur: FamilyPile,
    /// Draw-only; spent fatigue cards leave circulation.
    pub fatigue: Vec<Card>,
}

impl TeamDecks {
    /// Build a team's decks from configuration, with freshly allocated
    /// card ids and shuffled sprinteur/rouleur stacks.
    pub fn build(config: &DeckConfig, ids: &mut IdAllocator, rng: &mut GameRng) -> Self {
        let mut make = |family: CardFamily, values: &[u8]| -> Vec<Card> {
            values
                .iter()
                .map(|&value| Card::new(ids.card(), family, value))
                .collect()
        };

        let mut sprinteur = make(CardFamily::Sprinteur, config.sprinteur.as_slice());
        let mut rouleur = make(CardFamily::Rouleur, config.rouleur.as_slice());
        let fatigue = make(
            CardFamily::Fatigue,
            vec![config.fatigue_value; config.fatigue_count].as_slice(),
        );

        rng.shuffle(&mut sprinteur);
        rng.shuffle(&mut rouleur);

        Self {
            sprinteur: FamilyPile::new(CardFamily::Sprinteur, sprinteur),
            rouleur: FamilyPile::new(CardFamily::Rouleur, rouleur),
            fatigue,
        }
    }

    /// The recycled pile for a family. `None` for fatigue.
    #[must_use]
    pub fn pile(&self, family: CardFamily) -> Option<&FamilyPile> {
        match family {
            CardFamily::Sprinteur => Some(&self.sprinteur),
            CardFamily::Rouleur => Some(&self.rouleur),
            CardFamily::Fatigue => None,
        }
    }

    fn pile_mut(&mut self, family: CardFamily) -> Option<&mut FamilyPile> {
        match family {
            CardFamily::Sprinteur => Some(&mut self.sprinteur),
            CardFamily::Rouleur => Some(&mut self.rouleur),
            CardFamily::Fatigue => None,
        }
    }

    /// Route a card to the discard pile of its family.
    ///
    /// Returns `false` if the card was a fatigue card, which is retired
    /// instead of discarded.
    pub fn discard(&mut self, card: Card) -> bool {
        match self.pile_mut(card.family) {
            Some(pile) => {
                pile.discard(card);
                true
            }
            None => false,
        }
    }

    /// Empty a hand: recycled cards go to their discard piles, fatigue
    /// cards are retired. Returns the number of retired cards.
    pub fn clear_hand(&mut self, hand: &mut Hand) -> usize {
        hand.drain(..)
            .filter(|&card| !self.discard(card))
            .count()
    }

    /// Clear `hand` and deal a fresh one.
    ///
    /// For each family, draws up to the requested count, reshuffling the
    /// discard pile when the stack runs dry. A family that is fully
    /// exhausted quietly yields fewer cards. Returns the number of fatigue
    /// cards retired from the old hand.
    pub fn draw_hand(
        &mut self,
        hand: &mut Hand,
        composition: HandComposition,
        rng: &mut GameRng,
    ) -> usize {
        let retired = self.clear_hand(hand);

        for (family, count) in [
            (CardFamily::Sprinteur, composition.sprinteur),
            (CardFamily::Rouleur, composition.rouleur),
        ] {
            let Some(pile) = self.pile_mut(family) else {
                continue;
            };
            hand.extend(std::iter::from_fn(|| pile.draw(rng)).take(count));
        }

        retired
    }

    /// Pop one fatigue card into `hand`. Returns `false` if the fatigue
    /// stack is empty.
    pub fn grant_fatigue(&mut self, hand: &mut Hand) -> bool {
        match self.fatigue.pop() {
            Some(card) => {
                hand.push(card);
                true
            }
            None => false,
        }
    }

    /// Cards in stacks and discard piles, fatigue included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sprinteur.len() + self.rouleur.len() + self.fatigue.len()
    }

    /// True when the team has no undealt cards at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

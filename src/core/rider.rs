//! Riders, their positions, and the teams that own them.
//!
//! ## Rider
//!
//! A rider holds a hand of cards and at most one played card. Cards move
//! between a rider and the owning team's decks only through `Team`
//! methods, which keeps the decks and the hands consistent.
//!
//! ## Team
//!
//! A fixed list of riders plus the team's decks.

use serde::{Deserialize, Serialize};

use super::config::HandComposition;
use super::entity::{CardId, RiderId, TeamId};
use super::rng::GameRng;
use crate::cards::{Card, Hand, TeamDecks};

/// Colours handed out to teams, in creation order.
pub const TEAM_COLORS: [&str; 6] = ["red", "blue", "green", "yellow", "purple", "orange"];

/// Where a rider is on the track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub track_position: usize,
    pub lane: u8,
}

impl Position {
    #[must_use]
    pub const fn new(track_position: usize, lane: u8) -> Self {
        Self {
            track_position,
            lane,
        }
    }
}

/// Who chooses the rider's cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Human,
    Scripted,
}

/// A single rider.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Rider {
    pub id: RiderId,
    pub name: String,
    pub color: String,
    pub team_id: TeamId,
    pub control: Control,
    pub position: Position,
    pub hand: Hand,
    pub played_card: Option<Card>,
    pub fatigue_count: u32,
    pub finished: bool,
    pub finish_rank: Option<u32>,
}

impl Rider {
    /// A rider at the start line with an empty hand.
    #[must_use]
    pub fn new(
        id: RiderId,
        name: impl Into<String>,
        team_id: TeamId,
        control: Control,
        position: Position,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color: String::new(),
            team_id,
            control,
            position,
            hand: Hand::new(),
            played_card: None,
            fatigue_count: 0,
            finished: false,
            finish_rank: None,
        }
    }

    /// Set the display colour.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Still racing.
    #[must_use]
    pub fn is_racing(&self) -> bool {
        !self.finished
    }

    #[must_use]
    pub fn is_scripted(&self) -> bool {
        self.control == Control::Scripted
    }

    /// Position of a card in the hand.
    #[must_use]
    pub fn hand_index(&self, card: CardId) -> Option<usize> {
        self.hand.iter().position(|c| c.id == card)
    }

    /// Move the card at `index` from the hand into the played slot.
    ///
    /// A card already in the slot goes back into the hand.
    pub fn play_from_hand(&mut self, index: usize) -> Card {
        let card = self.hand.remove(index);
        if let Some(previous) = self.played_card.replace(card) {
            self.hand.push(previous);
        }
        card
    }
}

/// Default rider names for a team: sprinteur, rouleur, then numbered.
#[must_use]
pub fn rider_name(team_name: &str, index: usize) -> String {
    match index {
        0 => format!("{team_name} Sprinteur"),
        1 => format!("{team_name} Rouleur"),
        n => format!("{team_name} Rider {}", n + 1),
    }
}

/// A team and its decks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub riders: Vec<Rider>,
    pub decks: TeamDecks,
}

impl Team {
    /// Clear a rider's hand and deal a fresh one.
    ///
    /// Recycled cards from the old hand go to the discard piles and any
    /// fatigue cards in it are retired. Returns the number retired.
    pub fn draw(&mut self, rider: usize, hand: HandComposition, rng: &mut GameRng) -> usize {
        let Team { riders, decks, .. } = self;
        decks.draw_hand(&mut riders[rider].hand, hand, rng)
    }

    /// Give a rider one fatigue card and bump its fatigue count.
    ///
    /// Returns `false`, leaving the rider untouched, if the fatigue stack
    /// is empty.
    pub fn grant_fatigue(&mut self, rider: usize) -> bool {
        let Team { riders, decks, .. } = self;
        let rider = &mut riders[rider];
        let granted = decks.grant_fatigue(&mut rider.hand);
        if granted {
            rider.fatigue_count += 1;
        }
        granted
    }

    /// Empty a rider's played slot into the discard piles.
    pub fn discard_played(&mut self, rider: usize) {
        let Team { riders, decks, .. } = self;
        if let Some(card) = riders[rider].played_card.take() {
            decks.discard(card);
        }
    }

    /// Look up a rider by id.
    #[must_use]
    pub fn rider(&self, id: RiderId) -> Option<&Rider> {
        self.riders.iter().find(|r| r.id == id)
    }
}

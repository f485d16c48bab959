//! Card descriptors.
//!
//! A `Card` is immutable once created: an id, a family, and a movement
//! value. Cards are `Copy`, but the engine still treats each one as a
//! unique physical object that lives in exactly one container at a time.

use serde::{Deserialize, Serialize};

use crate::core::CardId;

/// Card family. Each team has one deck per family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardFamily {
    Sprinteur,
    Rouleur,
    /// Penalty cards. Drawn only through fatigue, never discarded.
    Fatigue,
}

impl CardFamily {
    /// Families that have a recycled discard pile.
    pub const RECYCLED: [CardFamily; 2] = [CardFamily::Sprinteur, CardFamily::Rouleur];

    /// Capitalised label used in card descriptions.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            CardFamily::Sprinteur => "Sprinteur",
            CardFamily::Rouleur => "Rouleur",
            CardFamily::Fatigue => "Fatigue",
        }
    }
}

impl std::fmt::Display for CardFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let repr = match self {
            CardFamily::Sprinteur => "sprinteur",
            CardFamily::Rouleur => "rouleur",
            CardFamily::Fatigue => "fatigue",
        };
        write!(f, "{repr}")
    }
}

/// A movement card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub family: CardFamily,
    /// Base movement, always at least 1.
    pub value: u8,
}

impl Card {
    /// Create a card. Values below 1 are raised to 1.
    #[must_use]
    pub fn new(id: CardId, family: CardFamily, value: u8) -> Self {
        Self {
            id,
            family,
            value: value.max(1),
        }
    }

    /// True for fatigue penalty cards.
    #[must_use]
    pub fn is_fatigue(&self) -> bool {
        self.family == CardFamily::Fatigue
    }
}

/// Renders the card's description, e.g. `Sprinteur 9` or `Fatigue`.
impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.family {
            CardFamily::Fatigue => write!(f, "{}", self.family.title()),
            family => write!(f, "{} {}", family.title(), self.value),
        }
    }
}

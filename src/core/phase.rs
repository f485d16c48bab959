//! Race phases and the allowed transitions between them.

use serde::{Deserialize, Serialize};

/// Phase of a race turn.
///
/// A turn cycles `CardSelection → Movement → Slipstream → Fatigue` and then
/// either starts the next turn or ends the race.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Waiting for every racing rider to have a played card.
    #[default]
    CardSelection,
    /// Riders move in initiative order.
    Movement,
    /// Riders directly behind another rider slide forward.
    Slipstream,
    /// Penalties and hand redraw.
    Fatigue,
    /// Terminal.
    GameOver,
}

impl Phase {
    /// Phases reachable in one transition.
    #[must_use]
    pub const fn successors(self) -> &'static [Phase] {
        match self {
            Phase::CardSelection => &[Phase::Movement],
            Phase::Movement => &[Phase::Slipstream],
            Phase::Slipstream => &[Phase::Fatigue],
            Phase::Fatigue => &[Phase::CardSelection, Phase::GameOver],
            Phase::GameOver => &[],
        }
    }

    /// Check whether `next` directly follows this phase.
    #[must_use]
    pub fn can_advance_to(self, next: Phase) -> bool {
        self.successors().contains(&next)
    }

    /// True once the race has ended.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Phase::GameOver)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let repr = match self {
            Phase::CardSelection => "card_selection",
            Phase::Movement => "movement",
            Phase::Slipstream => "slipstream",
            Phase::Fatigue => "fatigue",
            Phase::GameOver => "game_over",
        };
        write!(f, "{repr}")
    }
}

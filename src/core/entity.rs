//! Identifiers for race entities.
//!
//! Teams, riders, and cards get small integer ids allocated sequentially
//! when a race is created. Races themselves are keyed by a UUID so that
//! stores can hand them out without coordination.
//!
//! ## ID Layout
//!
//! All three entity kinds share one counter, so an id is unique across
//! kinds within a race:
//!
//! ```
//! use peloton::core::IdAllocator;
//!
//! let mut ids = IdAllocator::default();
//! let team = ids.team();
//! let rider = ids.rider();
//! let card = ids.card();
//!
//! assert_eq!(team.raw(), 0);
//! assert_eq!(rider.raw(), 1);
//! assert_eq!(card.raw(), 2);
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Create an id from its raw value.
            #[must_use]
            pub const fn new(id: u32) -> Self {
                Self(id)
            }

            /// Get the raw id value.
            #[must_use]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a team within a race.
    TeamId,
    "Team"
);

entity_id!(
    /// Identifier of a rider within a race.
    RiderId,
    "Rider"
);

entity_id!(
    /// Identifier of a single physical card within a race.
    ///
    /// Two cards with the same family and value still have distinct ids,
    /// which is what lets a caller pick one specific card out of a hand.
    CardId,
    "Card"
);

/// Identifier of a stored race.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RaceId(pub Uuid);

impl RaceId {
    /// Generate a fresh random race id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for RaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sequential id source used while a race is being built.
#[derive(Clone, Debug, Default)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    fn bump(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Allocate a team id.
    pub fn team(&mut self) -> TeamId {
        TeamId(self.bump())
    }

    /// Allocate a rider id.
    pub fn rider(&mut self) -> RiderId {
        RiderId(self.bump())
    }

    /// Allocate a card id.
    pub fn card(&mut self) -> CardId {
        CardId(self.bump())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocator_is_sequential_across_kinds() {
        let mut ids = IdAllocator::default();

        assert_eq!(ids.card(), CardId(0));
        assert_eq!(ids.card(), CardId(1));
        assert_eq!(ids.rider(), RiderId(2));
        assert_eq!(ids.team(), TeamId(3));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CardId(42)), "Card(42)");
        assert_eq!(format!("{}", RiderId(7)), "Rider(7)");
        assert_eq!(format!("{}", TeamId(1)), "Team(1)");
    }

    #[test]
    fn test_ids_serialize_as_plain_numbers() {
        let json = serde_json::to_string(&RiderId(12)).unwrap();
        assert_eq!(json, "12");

        let back: RiderId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RiderId(12));
    }

    #[test]
    fn test_race_ids_are_unique() {
        assert_ne!(RaceId::generate(), RaceId::generate());
    }
}

//! Card system: descriptors and per-team decks.
//!
//! ## Key Types
//!
//! - `Card`: Immutable card (id, family, value)
//! - `CardFamily`: Sprinteur, rouleur, or fatigue
//! - `FamilyPile`: Draw stack plus discard pile with reshuffle
//! - `TeamDecks`: Everything a team owns outside riders' hands
//! - `Hand`: Cards held by a rider

pub mod definition;
pub mod deck;

pub use definition::{Card, CardFamily};
pub use deck::{FamilyPile, Hand, TeamDecks};

//! # peloton
//!
//! A turn-based bicycle race engine: riders advance along a lane-limited
//! track by playing movement cards, draft behind each other, and pick up
//! fatigue when they ride alone.
//!
//! ## Design Principles
//!
//! 1. **Owned State**: A race is one serializable `GameState`. Operations
//!    take it by `&mut` and append human-readable lines to its log.
//!
//! 2. **Deterministic**: Every random decision draws from the race's seeded
//!    `GameRng`, which travels with the state.
//!
//! 3. **Cards Move, Never Copy**: A card sits in exactly one stack, discard
//!    pile, hand or played slot. `zones::CardCensus` checks it.
//!
//! ## Turn Structure
//!
//! `card_selection → movement → slipstream → fatigue`, then the next turn
//! or `game_over` once any rider has crossed the line.
//!
//! ## Modules
//!
//! - `core`: Ids, riders, teams, state, phases, errors, RNG, configuration
//! - `cards`: Cards, family piles and team decks
//! - `zones`: Card census for conservation checks
//! - `track`: Tiles, terrain, weather and the standard course
//! - `rules`: Movement, lanes, slipstream, fatigue and the `RaceEngine`
//! - `ai`: Card policies for scripted riders
//! - `store`: State store contract, in-memory store and `RaceService`

pub mod core;
pub mod cards;
pub mod zones;
pub mod track;
pub mod rules;
pub mod ai;
pub mod store;

// Re-export commonly used types
pub use crate::core::{
    CardId, RaceId, RiderId, TeamId,
    GameRng, GameRngState,
    RaceConfig, DeckConfig, HandComposition,
    Phase, RaceError, RaceEvent, StoreError, TrackError,
    Control, Position, Rider, Team,
    GameState,
};

pub use crate::cards::{Card, CardFamily, FamilyPile, Hand, TeamDecks};

pub use crate::zones::{CardCensus, Zone};

pub use crate::track::{Terrain, Tile, Track, Weather};

pub use crate::rules::{RaceEngine, StepReport};

pub use crate::ai::{CardPolicy, ScriptedPolicy};

pub use crate::store::{MemoryStore, RaceService, StateStore};

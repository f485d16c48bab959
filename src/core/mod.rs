//! Core race types: ids, riders, teams, state, phases, RNG, configuration.
//!
//! This module holds the data model. The rules that drive it live in
//! `rules`, and the scripted opponents in `ai`.

pub mod entity;
pub mod rng;
pub mod config;
pub mod phase;
pub mod error;
pub mod event;
pub mod rider;
pub mod state;

pub use entity::{CardId, IdAllocator, RaceId, RiderId, TeamId};
pub use rng::{GameRng, GameRngState};
pub use config::{
    DeckConfig, HandComposition, RaceConfig, FATIGUE_DECK_SIZE, FATIGUE_VALUE, ROULEUR_VALUES,
    SPRINTEUR_VALUES,
};
pub use phase::Phase;
pub use error::{RaceError, StoreError, TrackError};
pub use event::RaceEvent;
pub use rider::{rider_name, Control, Position, Rider, Team, TEAM_COLORS};
pub use state::{GameState, RiderSlot};

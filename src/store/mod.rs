//! Race persistence.
//!
//! The engine works on one in-memory `GameState` at a time. This module
//! supplies the load, operate, save cycle around it:
//!
//! - `StateStore`: where race documents live
//! - `MemoryStore`: JSON documents in a process-local map
//! - `RaceService`: the race operations, serialized per race

pub mod memory;
pub mod service;

pub use memory::MemoryStore;
pub use service::RaceService;

use crate::core::{GameState, RaceId, StoreError};

/// Storage for race documents.
pub trait StateStore: Send + Sync {
    /// Load a race. `Ok(None)` when no race has this id.
    fn load(&self, id: RaceId) -> Result<Option<GameState>, StoreError>;

    /// Insert or replace a race.
    fn save(&self, id: RaceId, state: &GameState) -> Result<(), StoreError>;
}

//! In-memory document store.

use std::sync::{PoisonError, RwLock};

use rustc_hash::FxHashMap;

use super::StateStore;
use crate::core::{GameState, RaceId, StoreError};

/// Keeps every race as a JSON document in memory.
///
/// Documents go through `serde_json` on every save and load, so a race read
/// back is exactly what a document database would return.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: RwLock<FxHashMap<RaceId, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored races.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Raw JSON document of a race.
    #[must_use]
    pub fn document(&self, id: RaceId) -> Option<String> {
        self.documents
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }
}

impl StateStore for MemoryStore {
    fn load(&self, id: RaceId) -> Result<Option<GameState>, StoreError> {
        let documents = self.documents.read().unwrap_or_else(PoisonError::into_inner);
        documents
            .get(&id)
            .map(|doc| serde_json::from_str::<GameState>(doc))
            .transpose()
            .map_err(StoreError::from)
    }

    fn save(&self, id: RaceId, state: &GameState) -> Result<(), StoreError> {
        let doc = serde_json::to_string(state)?;
        self.documents
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, doc);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RaceConfig;
    use crate::rules::RaceEngine;

    #[test]
    fn test_missing_race_loads_none() {
        let store = MemoryStore::new();
        assert!(store.load(RaceId::generate()).unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let store = MemoryStore::new();
        let state = RaceEngine::new(RaceConfig::new(4))
            .new_race(&["A", "B"])
            .unwrap();

        store.save(state.id, &state).unwrap();
        let loaded = store.load(state.id).unwrap().unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(loaded.id, state.id);
        assert_eq!(loaded.teams.len(), 2);
        assert_eq!(loaded.teams[0].riders[0].hand, state.teams[0].riders[0].hand);
        assert_eq!(loaded.rng.state(), state.rng.state());
    }

    #[test]
    fn test_document_is_snake_case_json() {
        let store = MemoryStore::new();
        let state = RaceEngine::default().new_race(&["A"]).unwrap();
        store.save(state.id, &state).unwrap();

        let doc = store.document(state.id).unwrap();
        assert!(doc.contains("\"current_phase\":\"card_selection\""));
        assert!(doc.contains("\"terrain\":\"start\""));
        assert!(doc.contains("\"control\":\"human\""));
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        let store = MemoryStore::new();
        let id = RaceId::generate();
        store
            .documents
            .write()
            .unwrap()
            .insert(id, "{not json".into());

        assert!(matches!(store.load(id), Err(StoreError::Serialization(_))));
    }
}

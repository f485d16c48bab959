//! Race operations over a store.
//!
//! Every operation is load, operate, save. Operations on the same race
//! are serialized by a per-race lock held for the whole cycle; different
//! races proceed in parallel. A lock lives only while some operation on
//! its race is running. A failed operation saves nothing.

use std::sync::{Arc, Mutex, PoisonError};

use rustc_hash::FxHashMap;

use super::StateStore;
use crate::ai::{CardPolicy, ScriptedPolicy};
use crate::core::{CardId, GameState, RaceConfig, RaceError, RaceId, RiderId};
use crate::rules::{RaceEngine, StepReport};

/// Race operations backed by a [`StateStore`].
///
/// ## Usage
///
/// ```
/// use peloton::core::{Phase, RaceConfig};
/// use peloton::store::{MemoryStore, RaceService};
///
/// let service = RaceService::new(MemoryStore::new(), RaceConfig::new(3));
/// let race = service.create_default_race().unwrap();
///
/// let (state, _) = service.process_step(race.id).unwrap();
/// assert_eq!(state.current_phase, Phase::CardSelection);
/// ```
pub struct RaceService<S, P = ScriptedPolicy> {
    store: S,
    engine: RaceEngine<P>,
    locks: Mutex<FxHashMap<RaceId, Arc<Mutex<()>>>>,
}

impl<S: StateStore> RaceService<S, ScriptedPolicy> {
    #[must_use]
    pub fn new(store: S, config: RaceConfig) -> Self {
        Self::with_engine(store, RaceEngine::new(config))
    }
}

impl<S: StateStore, P: CardPolicy> RaceService<S, P> {
    /// Teams used by [`create_default_race`](Self::create_default_race).
    pub const DEFAULT_TEAMS: [&'static str; 3] = ["Human Team", "AI Team 1", "AI Team 2"];

    #[must_use]
    pub fn with_engine(store: S, engine: RaceEngine<P>) -> Self {
        Self {
            store,
            engine,
            locks: Mutex::new(FxHashMap::default()),
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn engine(&self) -> &RaceEngine<P> {
        &self.engine
    }

    fn lock_for(&self, id: RaceId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(id).or_default())
    }

    /// Drop our handle on a race lock, removing it from the map when no
    /// other operation holds one.
    fn release(&self, id: RaceId, lock: Arc<Mutex<()>>) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        drop(lock);
        if locks.get(&id).is_some_and(|l| Arc::strong_count(l) == 1) {
            locks.remove(&id);
        }
    }

    /// Load a race, apply `op`, and save the result if `op` succeeded.
    fn with_race<T>(
        &self,
        id: RaceId,
        op: impl FnOnce(&RaceEngine<P>, &mut GameState) -> Result<T, RaceError>,
    ) -> Result<(GameState, T), RaceError> {
        let lock = self.lock_for(id);
        let result = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            self.load_apply_save(id, op)
        };
        self.release(id, lock);
        result
    }

    fn load_apply_save<T>(
        &self,
        id: RaceId,
        op: impl FnOnce(&RaceEngine<P>, &mut GameState) -> Result<T, RaceError>,
    ) -> Result<(GameState, T), RaceError> {
        let mut state = self.store.load(id)?.ok_or(RaceError::RaceNotFound(id))?;
        let out = op(&self.engine, &mut state)?;
        self.store.save(id, &state)?;
        Ok((state, out))
    }

    /// Races with an operation in flight.
    #[cfg(test)]
    fn active_locks(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Create and store a race with one team per name.
    pub fn create_race<N: AsRef<str>>(&self, team_names: &[N]) -> Result<GameState, RaceError> {
        let state = self.engine.new_race(team_names)?;
        self.store.save(state.id, &state)?;
        Ok(state)
    }

    /// Create a race with [`DEFAULT_TEAMS`](Self::DEFAULT_TEAMS).
    pub fn create_default_race(&self) -> Result<GameState, RaceError> {
        self.create_race(&Self::DEFAULT_TEAMS)
    }

    /// Fetch a stored race.
    pub fn get_race(&self, id: RaceId) -> Result<GameState, RaceError> {
        self.store.load(id)?.ok_or(RaceError::RaceNotFound(id))
    }

    /// Play a card for a rider.
    pub fn select_card(
        &self,
        id: RaceId,
        rider: RiderId,
        card: CardId,
    ) -> Result<GameState, RaceError> {
        self.with_race(id, |engine, state| engine.select_card(state, rider, card))
            .map(|(state, ())| state)
    }

    /// Run the race forward as far as it goes without human input.
    pub fn process_step(&self, id: RaceId) -> Result<(GameState, StepReport), RaceError> {
        self.with_race(id, |engine, state| engine.process_step(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Phase, StoreError};
    use crate::store::MemoryStore;

    fn service() -> RaceService<MemoryStore> {
        RaceService::new(MemoryStore::new(), RaceConfig::new(21))
    }

    #[test]
    fn test_create_default_race() {
        let service = service();
        let race = service.create_default_race().unwrap();

        let names: Vec<_> = race.teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Human Team", "AI Team 1", "AI Team 2"]);
        assert_eq!(service.store().len(), 1);
        assert_eq!(service.get_race(race.id).unwrap().id, race.id);
    }

    #[test]
    fn test_unknown_race() {
        let service = service();
        let id = RaceId::generate();

        assert!(matches!(service.get_race(id), Err(RaceError::RaceNotFound(_))));
        assert!(matches!(service.process_step(id), Err(RaceError::RaceNotFound(_))));
        assert!(service
            .select_card(id, RiderId(0), CardId(0))
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_unseeded_races_get_their_own_deal() {
        let service = RaceService::new(MemoryStore::new(), RaceConfig::default());
        let deal = |race: &GameState| -> Vec<Vec<(u32, u8)>> {
            race.riders()
                .map(|r| r.hand.iter().map(|c| (c.id.raw(), c.value)).collect())
                .collect()
        };

        let a = service.create_default_race().unwrap();
        let b = service.create_default_race().unwrap();

        assert_ne!(deal(&a), deal(&b));
    }

    #[test]
    fn test_locks_released_after_operations() {
        let service = service();
        for _ in 0..100 {
            let _ = service.process_step(RaceId::generate());
            let _ = service.select_card(RaceId::generate(), RiderId(0), CardId(0));
        }
        assert_eq!(service.active_locks(), 0);

        let race = service.create_default_race().unwrap();
        service.process_step(race.id).unwrap();
        assert_eq!(service.active_locks(), 0);
    }

    #[test]
    fn test_failed_operation_saves_nothing() {
        let service = service();
        let race = service.create_race(&["A", "B"]).unwrap();
        let before = service.store().document(race.id);

        let err = service
            .select_card(race.id, RiderId(999), CardId(0))
            .unwrap_err();

        assert!(matches!(err, RaceError::RiderNotFound(_)));
        assert_eq!(service.store().document(race.id), before);
    }

    #[test]
    fn test_turn_through_service() {
        let service = service();
        let race = service.create_race(&["Human", "Bot"]).unwrap();

        for rider in &race.teams[0].riders {
            service
                .select_card(race.id, rider.id, rider.hand[0].id)
                .unwrap();
        }
        let (state, report) = service.process_step(race.id).unwrap();

        assert_eq!(report.turn, 2);
        assert_eq!(state.current_turn, 2);
        assert_eq!(state.current_phase, Phase::CardSelection);
        assert_eq!(service.get_race(race.id).unwrap().current_turn, 2);
    }

    struct Offline;

    impl StateStore for Offline {
        fn load(&self, _: RaceId) -> Result<Option<GameState>, StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }

        fn save(&self, _: RaceId, _: &GameState) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn test_store_failure_surfaces() {
        let service = RaceService::new(Offline, RaceConfig::default());

        assert!(matches!(
            service.create_default_race(),
            Err(RaceError::Storage(StoreError::Unavailable(_)))
        ));
        assert!(matches!(
            service.get_race(RaceId::generate()),
            Err(RaceError::Storage(_))
        ));
    }
}

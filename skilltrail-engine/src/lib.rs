//! Skilltrail Progression Engine
//!
//! Platform-agnostic core logic for the Skilltrail gamified learning
//! journeys: users progress through persona-specific journeys made of
//! sequential Learn → Build → Prove → Activate → Scale phases, earning XP,
//! levels and simulated reward tokens along the way. This crate carries the
//! content model, the phase unlock rules and the two progression state
//! machines, with no UI or platform-specific dependencies.

pub mod catalog;
pub mod content;
pub mod error;
pub mod journey_store;
pub mod progress;
pub mod repository;
pub mod simulation_store;
pub mod storage;
pub mod unlock;

// Re-export commonly used types
pub use catalog::{Catalog, DEFAULT_PHASE_ICON, LegacyJourney, RawJourney, RawPhase, slugify};
pub use content::{
    JourneyContent, JourneyMetadata, JourneyPhase, JourneyReward, NftBadge, Persona,
    ProtocolPhase, Rarity, Reward,
};
pub use error::{FetchContext, FetchErrorKind, classify_message, describe_failure, user_message};
pub use journey_store::{JourneySnapshot, JourneyStore};
pub use progress::{
    JOURNEY_XP_TARGET, XP_PER_LEVEL, journey_progress_pct, level_for_xp, level_progress_pct,
    required_xp_for_next_level,
};
pub use repository::{BundledProvider, JourneyRepository, SlugStrategy, resolve_slug};
pub use simulation_store::{SimulationSnapshot, SimulationStore, WalletError};
pub use storage::{JOURNEY_STORE_KEY, MemoryProgressStore, SIMULATION_STORE_KEY};
pub use unlock::is_phase_unlocked;

use log::warn;

/// Trait for abstracting journey content loading.
/// Host applications pick the implementation that fits their execution
/// context (bundled catalog, filesystem markdown, remote source).
pub trait ContentProvider {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the full journey set from this source.
    ///
    /// # Errors
    ///
    /// Returns an error if the journey content cannot be loaded.
    fn load_journeys(&self) -> Result<Vec<JourneyContent>, Self::Error>;

    /// Load a single journey by its exact slug. The default scans the full
    /// set; sources with cheaper per-slug access should override.
    ///
    /// # Errors
    ///
    /// Returns an error if the journey content cannot be loaded.
    fn load_journey(&self, slug: &str) -> Result<Option<JourneyContent>, Self::Error> {
        Ok(self
            .load_journeys()?
            .into_iter()
            .find(|j| j.metadata.slug == slug))
    }
}

/// Trait for abstracting local progress persistence: a namespaced key to
/// JSON-string map. Writes are best effort; the engine treats unreadable or
/// corrupt values as absent.
pub trait ProgressStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Store `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be written.
    fn put(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Fetch the value under `key`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Remove the value under `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store cannot be modified.
    fn delete(&self, key: &str) -> Result<(), Self::Error>;
}

/// Engine tying a content source and a progress store together, restoring
/// and persisting the two state machines.
pub struct JourneyEngine<P, S>
where
    P: ContentProvider,
    S: ProgressStore,
{
    repository: JourneyRepository<P>,
    storage: S,
}

impl<P, S> JourneyEngine<P, S>
where
    P: ContentProvider,
    S: ProgressStore,
{
    /// Create an engine over the given content provider and progress store.
    pub const fn new(provider: P, storage: S) -> Self {
        Self {
            repository: JourneyRepository::new(provider),
            storage,
        }
    }

    /// The journey repository backed by this engine's provider.
    pub const fn repository(&self) -> &JourneyRepository<P> {
        &self.repository
    }

    /// Restore the journey store from persisted state. Any read or
    /// deserialization failure discards the blob and yields a fresh store.
    pub fn load_journey_store(&self) -> JourneyStore {
        match self.read_snapshot::<JourneySnapshot>(JOURNEY_STORE_KEY) {
            Some(snapshot) => JourneyStore::from_snapshot(snapshot),
            None => JourneyStore::new(),
        }
    }

    /// Persist the journey store's durable fields.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails.
    pub fn save_journey_store(&self, store: &JourneyStore) -> Result<(), anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        let json = serde_json::to_string(&store.snapshot())?;
        self.storage
            .put(JOURNEY_STORE_KEY, &json)
            .map_err(Into::into)
    }

    /// Restore the simulation store from persisted state, falling back to
    /// defaults exactly as [`Self::load_journey_store`] does.
    pub fn load_simulation(&self) -> SimulationStore {
        match self.read_snapshot::<SimulationSnapshot>(SIMULATION_STORE_KEY) {
            Some(snapshot) => SimulationStore::from_snapshot(snapshot),
            None => SimulationStore::new(),
        }
    }

    /// Persist the simulation store's durable fields.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the storage write fails.
    pub fn save_simulation(&self, store: &SimulationStore) -> Result<(), anyhow::Error>
    where
        S::Error: Into<anyhow::Error>,
    {
        let json = serde_json::to_string(&store.snapshot())?;
        self.storage
            .put(SIMULATION_STORE_KEY, &json)
            .map_err(Into::into)
    }

    /// Drop all persisted progress.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be modified.
    pub fn clear_saved_progress(&self) -> Result<(), S::Error> {
        self.storage.delete(JOURNEY_STORE_KEY)?;
        self.storage.delete(SIMULATION_STORE_KEY)
    }

    fn read_snapshot<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.storage.get(key) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!("progress store read failed for {key}: {err}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!("discarding corrupt snapshot under {key}: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> JourneyEngine<BundledProvider, MemoryProgressStore> {
        JourneyEngine::new(BundledProvider, MemoryProgressStore::new())
    }

    #[test]
    fn engine_round_trips_journey_store() {
        let engine = engine();
        let mut store = engine.load_journey_store();
        store.fetch_journey_by_slug(engine.repository(), "creator-path");
        store.set_current_phase_index(1);
        engine.save_journey_store(&store).unwrap();

        let restored = engine.load_journey_store();
        assert_eq!(
            restored.current_journey.as_ref().unwrap().metadata.slug,
            "creator-path"
        );
        assert_eq!(restored.current_phase_index, 1);
    }

    #[test]
    fn engine_round_trips_simulation() {
        let engine = engine();
        let mut sim = engine.load_simulation();
        let journey = engine
            .repository()
            .get_journey_by_slug("explorer-path")
            .unwrap()
            .unwrap();
        sim.set_current_journey(journey);
        sim.add_xp(1_200);
        sim.complete_phase(0);
        engine.save_simulation(&sim).unwrap();

        let restored = engine.load_simulation();
        assert_eq!(restored.total_xp, 1_200);
        assert_eq!(restored.level, 2);
        assert!(restored.is_phase_completed(0));
        assert!(restored.is_phase_unlocked(1));
    }

    #[test]
    fn corrupt_snapshot_yields_defaults() {
        let storage = MemoryProgressStore::new();
        storage.put(SIMULATION_STORE_KEY, "{not json").unwrap();
        storage.put(JOURNEY_STORE_KEY, "[1,2,3]").unwrap();
        let engine = JourneyEngine::new(BundledProvider, storage);

        let sim = engine.load_simulation();
        assert_eq!(sim.total_xp, 0);
        assert_eq!(sim.level, 1);
        let journeys = engine.load_journey_store();
        assert!(journeys.current_journey.is_none());
    }

    #[test]
    fn clear_saved_progress_removes_both_keys() {
        let storage = MemoryProgressStore::new();
        let engine = JourneyEngine::new(BundledProvider, storage.clone());
        engine.save_simulation(&SimulationStore::new()).unwrap();
        engine.save_journey_store(&JourneyStore::new()).unwrap();
        assert_eq!(storage.len(), 2);
        engine.clear_saved_progress().unwrap();
        assert!(storage.is_empty());
    }
}

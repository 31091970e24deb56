//! In-memory progress store and the persistence key namespaces.
use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::rc::Rc;

use crate::ProgressStore;

/// Key under which the journey store snapshot is persisted.
pub const JOURNEY_STORE_KEY: &str = "skilltrail.journey.v1";

/// Key under which the simulation store snapshot is persisted.
pub const SIMULATION_STORE_KEY: &str = "skilltrail.simulation.v1";

/// Progress store backed by a shared in-memory map. Clones share the same
/// entries, so one instance can be handed to an engine while a test keeps a
/// handle for inspection. Single-threaded by design, like the rest of the
/// state machine.
#[derive(Debug, Clone, Default)]
pub struct MemoryProgressStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryProgressStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl ProgressStore for MemoryProgressStore {
    type Error = Infallible;

    fn put(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn delete(&self, key: &str) -> Result<(), Self::Error> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

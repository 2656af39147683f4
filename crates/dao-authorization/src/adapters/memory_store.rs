//! # In-Memory State Store
//!
//! Global and local integer state for any number of applications, guarded
//! by a single lock so an evaluation and its commit see one snapshot.

use crate::domain::effects::StateWrite;
use crate::domain::errors::StateError;
use crate::domain::invariants::ensure_monotonic;
use crate::domain::value_objects::{Address, AppId, StateKey, GLOBAL_RECEIVED_TOTAL};
use crate::ports::outbound::{AppStateStore, StateSnapshot};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Plain state tables. Local entries appear on first write.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateTables {
    global: HashMap<(AppId, StateKey), u64>,
    local: HashMap<(AppId, Address), BTreeMap<StateKey, u64>>,
}

impl StateTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one write, enforcing `ReceivedTotal` monotonicity.
    pub fn apply(&mut self, write: &StateWrite) -> Result<(), StateError> {
        match write {
            StateWrite::Global { app_id, key, value } => {
                if *key == GLOBAL_RECEIVED_TOTAL {
                    ensure_monotonic(*key, self.global_uint(*app_id, *key), *value)?;
                }
                self.global.insert((*app_id, *key), *value);
            }
            StateWrite::Local {
                app_id,
                account,
                key,
                value,
            } => {
                self.local
                    .entry((*app_id, *account))
                    .or_default()
                    .insert(*key, *value);
            }
            StateWrite::ClearLocal { app_id, account } => {
                self.local.remove(&(*app_id, *account));
            }
        }
        Ok(())
    }

    pub fn set_global(&mut self, app_id: AppId, key: StateKey, value: u64) {
        self.global.insert((app_id, key), value);
    }

    pub fn set_local(&mut self, app_id: AppId, account: Address, key: StateKey, value: u64) {
        self.local
            .entry((app_id, account))
            .or_default()
            .insert(key, value);
    }

    /// Whether `account` has any local state in `app_id`.
    pub fn has_local(&self, app_id: AppId, account: &Address) -> bool {
        self.local.contains_key(&(app_id, *account))
    }
}

impl StateSnapshot for StateTables {
    fn global_uint(&self, app_id: AppId, key: StateKey) -> u64 {
        self.global.get(&(app_id, key)).copied().unwrap_or(0)
    }

    fn local_uint(&self, app_id: AppId, account: &Address, key: StateKey) -> u64 {
        self.local
            .get(&(app_id, *account))
            .and_then(|entries| entries.get(&key))
            .copied()
            .unwrap_or(0)
    }
}

/// Thread-safe state store for tests and local simulation.
#[derive(Debug, Default)]
pub struct InMemoryStateStore {
    tables: RwLock<StateTables>,
}

impl InMemoryStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a global value, bypassing validation.
    pub fn set_global(&self, app_id: AppId, key: StateKey, value: u64) {
        self.tables.write().set_global(app_id, key, value);
    }

    /// Seed a local value, bypassing validation.
    pub fn set_local(&self, app_id: AppId, account: Address, key: StateKey, value: u64) {
        self.tables.write().set_local(app_id, account, key, value);
    }

    pub fn has_local(&self, app_id: AppId, account: &Address) -> bool {
        self.tables.read().has_local(app_id, account)
    }

    /// Copy of the current tables.
    pub fn snapshot(&self) -> StateTables {
        self.tables.read().clone()
    }
}

impl AppStateStore for InMemoryStateStore {
    fn read<R>(&self, f: impl FnOnce(&dyn StateSnapshot) -> R) -> R {
        let tables = self.tables.read();
        f(&*tables)
    }

    fn transact<R, E>(
        &self,
        f: impl FnOnce(&dyn StateSnapshot) -> Result<(R, Vec<StateWrite>), E>,
    ) -> Result<R, E>
    where
        E: From<StateError>,
    {
        let mut tables = self.tables.write();
        let (result, writes) = f(&*tables)?;

        // Stage on a copy so a failing write leaves nothing behind
        let mut staged = tables.clone();
        for write in &writes {
            staged.apply(write)?;
        }
        *tables = staged;

        debug!(writes = writes.len(), "Committed state writes");
        Ok(result)
    }
}

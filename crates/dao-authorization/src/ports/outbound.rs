//! # Driven Ports (SPI - Outbound)
//!
//! Application state is injected into validators as a capability instead
//! of being read as ambient global state, so every validator can be run
//! against a synthetic snapshot.

use crate::domain::effects::StateWrite;
use crate::domain::entitlement::InvestorState;
use crate::domain::errors::StateError;
use crate::domain::value_objects::{
    Address, AppId, StateKey, GLOBAL_RECEIVED_TOTAL, LOCAL_HARVESTED_TOTAL, LOCAL_SHARES,
};

/// Read-only view of application state.
///
/// Entries that were never written read as 0.
pub trait StateSnapshot {
    fn global_uint(&self, app_id: AppId, key: StateKey) -> u64;

    fn local_uint(&self, app_id: AppId, account: &Address, key: StateKey) -> u64;

    fn received_total(&self, app_id: AppId) -> u64 {
        self.global_uint(app_id, GLOBAL_RECEIVED_TOTAL)
    }

    fn investor_state(&self, app_id: AppId, account: &Address) -> InvestorState {
        InvestorState {
            shares: self.local_uint(app_id, account, LOCAL_SHARES),
            harvested_total: self.local_uint(app_id, account, LOCAL_HARVESTED_TOTAL),
        }
    }
}

/// Application state store shared by all registries, keyed by app id.
///
/// Both methods hold one consistent snapshot for the whole closure, which
/// is all the isolation a single group evaluation needs.
pub trait AppStateStore: Send + Sync {
    /// Run `f` against a consistent snapshot without writing.
    fn read<R>(&self, f: impl FnOnce(&dyn StateSnapshot) -> R) -> R;

    /// Run `f` against a consistent snapshot and commit the writes it
    /// returns. Writes are applied all together or not at all.
    fn transact<R, E>(
        &self,
        f: impl FnOnce(&dyn StateSnapshot) -> Result<(R, Vec<StateWrite>), E>,
    ) -> Result<R, E>
    where
        E: From<StateError>;
}

//! State effects of approved groups
//!
//! Validators never write; they return the writes an approval implies and
//! the host commits them atomically.

use super::actions::ActionKind;
use super::value_objects::{Address, AppId, StateKey};

/// One write to application state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateWrite {
    Global {
        app_id: AppId,
        key: StateKey,
        value: u64,
    },
    Local {
        app_id: AppId,
        account: Address,
        key: StateKey,
        value: u64,
    },
    /// Ledger-side removal of an account's local state (CloseOut).
    ClearLocal { app_id: AppId, account: Address },
}

/// A validator's verdict for a group it authorizes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Approval {
    pub action: ActionKind,
    pub writes: Vec<StateWrite>,
}

impl Approval {
    /// Approval without state effect.
    pub fn stateless(action: ActionKind) -> Self {
        Self {
            action,
            writes: Vec::new(),
        }
    }

    pub fn with_write(mut self, write: StateWrite) -> Self {
        self.writes.push(write);
        self
    }
}

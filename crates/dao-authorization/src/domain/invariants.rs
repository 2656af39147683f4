//! Domain invariants
//!
//! Checks shared by the validators and the state store.

use super::entities::AssetTransfer;
use super::errors::{GroupRejected, StateError};
use super::value_objects::{Address, StateKey};

/// An escrow-signed transfer pays no fee and neither closes out nor
/// rekeys the escrow.
pub fn ensure_safe_transfer(slot: usize, transfer: &AssetTransfer) -> Result<(), GroupRejected> {
    if transfer.fee != 0 {
        return Err(GroupRejected::safety(slot, "fee"));
    }
    if !transfer.asset_close_to.is_zero() {
        return Err(GroupRejected::safety(slot, "asset_close_to"));
    }
    if !transfer.rekey_to.is_zero() {
        return Err(GroupRejected::safety(slot, "rekey_to"));
    }
    Ok(())
}

/// Assert `actual == expected` for a named field.
pub fn ensure_field<T: PartialEq>(
    slot: usize,
    field: &'static str,
    actual: &T,
    expected: &T,
) -> Result<(), GroupRejected> {
    if actual == expected {
        Ok(())
    } else {
        Err(GroupRejected::field(slot, field))
    }
}

/// Assert two members of the group are sent by the same account.
pub fn ensure_same_sender(
    slot: usize,
    sender: &Address,
    expected: &Address,
) -> Result<(), GroupRejected> {
    ensure_field(slot, "sender", sender, expected)
}

/// `ReceivedTotal` only ever grows.
pub fn ensure_monotonic(key: StateKey, current: u64, proposed: u64) -> Result<(), StateError> {
    if proposed < current {
        return Err(StateError::NonMonotonic {
            key,
            current,
            proposed,
        });
    }
    Ok(())
}

//! Drain amount split
//!
//! Submitters use this to build Drain groups: the capi cut goes to the capi
//! escrow, the remainder to the central escrow.

use super::value_objects::Amount;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrainAmounts {
    /// Moved to the central escrow.
    pub dao: Amount,
    /// Moved to the capi escrow.
    pub capi: Amount,
}

impl DrainAmounts {
    /// Split `available` funds, where `capi_share` is a fraction scaled by
    /// `precision`.
    ///
    /// Returns `None` on overflow, zero precision, or a share above 1.
    pub fn split(available: Amount, capi_share: u64, precision: u64) -> Option<Self> {
        if capi_share > precision {
            return None;
        }
        let capi = available.checked_mul(capi_share)?.checked_div(precision)?;
        Some(Self {
            dao: available - capi,
            capi,
        })
    }

    pub fn total(&self) -> Amount {
        self.dao + self.capi
    }
}

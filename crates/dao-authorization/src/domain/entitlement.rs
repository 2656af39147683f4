//! Entitlement calculation
//!
//! `entitled_total = floor(shares * received_total / precision)` and
//! `pending = entitled_total - harvested_total`.
//!
//! Arithmetic follows the ledger's 64-bit execution engine: any overflow,
//! underflow or division by zero rejects instead of wrapping or clamping.

use super::errors::GroupRejected;
use super::value_objects::Amount;
use serde::{Deserialize, Serialize};

/// Per-account local state of a registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorState {
    pub shares: u64,
    pub harvested_total: Amount,
}

/// Cumulative amount owed to an account holding `shares`.
pub fn entitled_total(
    shares: u64,
    received_total: Amount,
    precision: u64,
) -> Result<Amount, GroupRejected> {
    let product = shares
        .checked_mul(received_total)
        .ok_or(GroupRejected::Arithmetic("entitlement multiplication overflow"))?;
    product
        .checked_div(precision)
        .ok_or(GroupRejected::Arithmetic("entitlement division by zero"))
}

/// Entitlement not yet harvested.
///
/// A harvested total above the entitlement means corrupt state and is
/// rejected.
pub fn pending_harvest(
    investor: &InvestorState,
    received_total: Amount,
    precision: u64,
) -> Result<Amount, GroupRejected> {
    entitled_total(investor.shares, received_total, precision)?
        .checked_sub(investor.harvested_total)
        .ok_or(GroupRejected::Arithmetic("harvested total exceeds entitlement"))
}

/// Entitlement formula bound to one deployment's precision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntitlementCalculator {
    precision: u64,
}

impl EntitlementCalculator {
    pub fn new(precision: u64) -> Self {
        Self { precision }
    }

    pub fn precision(&self) -> u64 {
        self.precision
    }

    pub fn entitled_total(
        &self,
        shares: u64,
        received_total: Amount,
    ) -> Result<Amount, GroupRejected> {
        entitled_total(shares, received_total, self.precision)
    }

    pub fn pending_harvest(
        &self,
        investor: &InvestorState,
        received_total: Amount,
    ) -> Result<Amount, GroupRejected> {
        pending_harvest(investor, received_total, self.precision)
    }
}

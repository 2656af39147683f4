//! # Driving Ports (API - Inbound)

use crate::application::service::Admission;
use crate::domain::entities::TransactionGroup;
use crate::domain::entitlement::InvestorState;
use crate::domain::errors::{AuthorizationError, GroupRejected};
use crate::domain::value_objects::{Address, Amount};

/// Group authorization API, as used by a submitter or a host ledger.
pub trait GroupAuthorizationApi: Send + Sync {
    /// Evaluate every participating validator against the current state
    /// without committing anything. Safe to repeat.
    fn simulate(&self, group: &TransactionGroup) -> Result<Admission, AuthorizationError>;

    /// Evaluate and, if every participating validator approves, commit the
    /// group's state effects atomically.
    fn submit(&self, group: &TransactionGroup) -> Result<Admission, AuthorizationError>;

    /// Central app local state of `account`.
    fn investor_state(&self, account: &Address) -> InvestorState;

    /// Funds `account` may currently harvest from the central app.
    fn pending_harvest(&self, account: &Address) -> Result<Amount, GroupRejected>;

    /// Central app `ReceivedTotal`.
    fn received_total(&self) -> Amount;
}

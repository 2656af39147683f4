//! Group validators
//!
//! One validator per authorizing account. Each classifies the group once
//! and matches the resulting [`Action`] exhaustively; actions it does not
//! authorize are rejected, never approved by default.

pub mod capi_app;
pub mod central_app;
pub mod central_escrow;
pub mod customer_escrow;
mod setup_dao;

pub use capi_app::CapiAppValidator;
pub use central_app::CentralAppValidator;
pub use central_escrow::CentralEscrowValidator;
pub use customer_escrow::CustomerEscrowValidator;

use crate::config::TemplateParameters;
use crate::domain::actions::{Action, ActionKind, DrainGroup};
use crate::domain::classifier::GroupClassifier;
use crate::domain::effects::Approval;
use crate::domain::entities::TransactionGroup;
use crate::domain::errors::GroupRejected;
use crate::domain::invariants::ensure_field;
use crate::ports::outbound::StateSnapshot;

/// A rule set deciding whether a group is a legal instance of one of the
/// actions its account takes part in.
pub trait GroupValidator: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Decide on an already classified action.
    fn authorize(
        &self,
        action: &Action,
        state: &dyn StateSnapshot,
    ) -> Result<Approval, GroupRejected>;

    /// Classify `group` and decide on it.
    fn validate(
        &self,
        group: &TransactionGroup,
        state: &dyn StateSnapshot,
    ) -> Result<Approval, GroupRejected> {
        let action = GroupClassifier::new().classify(group)?;
        self.authorize(&action, state)
    }
}

fn not_authorized(validator: &str, action: ActionKind) -> GroupRejected {
    GroupRejected::shape(format!("{action} is not authorized by the {validator}"))
}

/// Both Drain transfers move the funds asset out of the customer escrow.
fn ensure_drained_from_customer_escrow(
    group: &DrainGroup,
    params: &TemplateParameters,
) -> Result<(), GroupRejected> {
    for (slot, transfer) in [
        (DrainGroup::SLOT_DRAIN_TRANSFER, &group.drain_transfer),
        (DrainGroup::SLOT_CAPI_SHARE_TRANSFER, &group.capi_share_transfer),
    ] {
        ensure_field(slot, "sender", &transfer.sender, &params.customer_escrow)?;
        ensure_field(slot, "asset_id", &transfer.asset_id, &params.funds_asset_id)?;
    }
    Ok(())
}

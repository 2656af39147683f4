//! Customer escrow validator
//!
//! Receives customer payments. Funds leave only through Drain, split
//! between the central escrow and the capi escrow.

use super::setup_dao::verify_setup_dao;
use super::{ensure_drained_from_customer_escrow, not_authorized, GroupValidator};
use crate::config::TemplateParameters;
use crate::domain::actions::{Action, ActionKind, DrainGroup, SetupDaoGroup};
use crate::domain::effects::Approval;
use crate::domain::errors::GroupRejected;
use crate::domain::invariants::{ensure_field, ensure_safe_transfer, ensure_same_sender};
use crate::domain::value_objects::OnCompletion;
use crate::ports::outbound::StateSnapshot;

pub struct CustomerEscrowValidator {
    params: TemplateParameters,
}

impl CustomerEscrowValidator {
    pub fn new(params: TemplateParameters) -> Self {
        Self { params }
    }

    fn drain(&self, group: &DrainGroup) -> Result<Approval, GroupRejected> {
        ensure_field(
            DrainGroup::SLOT_CENTRAL_APP_CALL,
            "app_id",
            &group.central_app_call.app_id,
            &self.params.central_app_id,
        )?;
        ensure_field(
            DrainGroup::SLOT_CAPI_APP_CALL,
            "app_id",
            &group.capi_app_call.app_id,
            &self.params.capi_app_id,
        )?;
        ensure_field(
            DrainGroup::SLOT_CENTRAL_APP_CALL,
            "on_completion",
            &group.central_app_call.on_completion,
            &OnCompletion::NoOp,
        )?;
        ensure_field(
            DrainGroup::SLOT_CAPI_APP_CALL,
            "on_completion",
            &group.capi_app_call.on_completion,
            &OnCompletion::NoOp,
        )?;
        ensure_same_sender(
            DrainGroup::SLOT_CAPI_APP_CALL,
            &group.capi_app_call.sender,
            &group.central_app_call.sender,
        )?;
        ensure_drained_from_customer_escrow(group, &self.params)?;

        let slot = DrainGroup::SLOT_DRAIN_TRANSFER;
        ensure_field(
            slot,
            "asset_receiver",
            &group.drain_transfer.asset_receiver,
            &self.params.central_escrow,
        )?;
        ensure_safe_transfer(slot, &group.drain_transfer)?;

        let slot = DrainGroup::SLOT_CAPI_SHARE_TRANSFER;
        ensure_field(
            slot,
            "asset_receiver",
            &group.capi_share_transfer.asset_receiver,
            &self.params.capi_escrow,
        )?;
        ensure_safe_transfer(slot, &group.capi_share_transfer)?;

        Ok(Approval::stateless(ActionKind::Drain))
    }
}

impl GroupValidator for CustomerEscrowValidator {
    fn name(&self) -> &'static str {
        "customer escrow"
    }

    fn authorize(
        &self,
        action: &Action,
        _state: &dyn StateSnapshot,
    ) -> Result<Approval, GroupRejected> {
        match action {
            Action::SetupDao(group) => {
                verify_setup_dao(group, &self.params, SetupDaoGroup::SLOT_CUSTOMER_FUNDS_OPT_IN)?;
                Ok(Approval::stateless(ActionKind::SetupDao))
            }
            Action::Drain(group) => self.drain(group),
            Action::Create(_)
            | Action::OptIn(_)
            | Action::Harvest(_)
            | Action::Unlock(_)
            | Action::Lock(_)
            | Action::Withdrawal(_) => Err(not_authorized(self.name(), action.kind())),
        }
    }
}

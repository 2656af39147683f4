//! Capi app validator
//!
//! The platform's own registry. It accepts creation and opt-ins, and
//! records what each Drain routes to the capi escrow.

use super::{ensure_drained_from_customer_escrow, not_authorized, GroupValidator};
use crate::config::TemplateParameters;
use crate::domain::actions::{Action, ActionKind, DrainGroup};
use crate::domain::effects::{Approval, StateWrite};
use crate::domain::errors::GroupRejected;
use crate::domain::invariants::{ensure_field, ensure_same_sender};
use crate::domain::value_objects::{OnCompletion, GLOBAL_RECEIVED_TOTAL};
use crate::ports::outbound::StateSnapshot;
use tracing::debug;

pub struct CapiAppValidator {
    params: TemplateParameters,
}

impl CapiAppValidator {
    pub fn new(params: TemplateParameters) -> Self {
        Self { params }
    }

    fn drain(
        &self,
        group: &DrainGroup,
        state: &dyn StateSnapshot,
    ) -> Result<Approval, GroupRejected> {
        let slot = DrainGroup::SLOT_CAPI_APP_CALL;
        let call = &group.capi_app_call;
        ensure_field(slot, "app_id", &call.app_id, &self.params.capi_app_id)?;
        ensure_field(slot, "on_completion", &call.on_completion, &OnCompletion::NoOp)?;
        ensure_field(
            DrainGroup::SLOT_CENTRAL_APP_CALL,
            "on_completion",
            &group.central_app_call.on_completion,
            &OnCompletion::NoOp,
        )?;
        ensure_same_sender(slot, &call.sender, &group.central_app_call.sender)?;
        ensure_drained_from_customer_escrow(group, &self.params)?;

        let app_id = self.params.capi_app_id;
        let amount = group.capi_share_transfer.asset_amount;
        let received_total = state
            .received_total(app_id)
            .checked_add(amount)
            .ok_or(GroupRejected::Arithmetic("capi received total overflow"))?;

        debug!(amount, received_total, "Capi share recorded");

        Ok(Approval::stateless(ActionKind::Drain).with_write(StateWrite::Global {
            app_id,
            key: GLOBAL_RECEIVED_TOTAL,
            value: received_total,
        }))
    }
}

impl GroupValidator for CapiAppValidator {
    fn name(&self) -> &'static str {
        "capi app"
    }

    fn authorize(
        &self,
        action: &Action,
        state: &dyn StateSnapshot,
    ) -> Result<Approval, GroupRejected> {
        match action {
            Action::Create(_) => Ok(Approval::stateless(ActionKind::Create)),
            Action::OptIn(_) => Ok(Approval::stateless(ActionKind::OptIn)),
            Action::Drain(group) => self.drain(group, state),
            Action::Harvest(_)
            | Action::Unlock(_)
            | Action::Lock(_)
            | Action::SetupDao(_)
            | Action::Withdrawal(_) => Err(not_authorized(self.name(), action.kind())),
        }
    }
}

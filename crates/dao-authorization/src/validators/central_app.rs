//! Central app validator
//!
//! The registry contract: tracks `ReceivedTotal` globally and each
//! investor's `Shares` / `HarvestedTotal` locally.

use super::setup_dao::verify_setup_app_call;
use super::{ensure_drained_from_customer_escrow, not_authorized, GroupValidator};
use crate::config::TemplateParameters;
use crate::domain::actions::{Action, ActionKind, DrainGroup, HarvestGroup, LockGroup, UnlockGroup};
use crate::domain::effects::{Approval, StateWrite};
use crate::domain::entities::ApplicationCall;
use crate::domain::entitlement::EntitlementCalculator;
use crate::domain::errors::{AmountBound, GroupRejected};
use crate::domain::invariants::{ensure_field, ensure_same_sender};
use crate::domain::value_objects::{
    OnCompletion, StateKey, GLOBAL_RECEIVED_TOTAL, LOCAL_HARVESTED_TOTAL, LOCAL_SHARES,
};
use crate::ports::outbound::StateSnapshot;
use tracing::debug;

pub struct CentralAppValidator {
    params: TemplateParameters,
    calculator: EntitlementCalculator,
}

impl CentralAppValidator {
    pub fn new(params: TemplateParameters) -> Self {
        let calculator = EntitlementCalculator::new(params.precision);
        Self { params, calculator }
    }

    fn ensure_central_call(
        &self,
        slot: usize,
        call: &ApplicationCall,
        on_completion: OnCompletion,
    ) -> Result<(), GroupRejected> {
        ensure_field(slot, "app_id", &call.app_id, &self.params.central_app_id)?;
        ensure_field(slot, "on_completion", &call.on_completion, &on_completion)
    }

    fn local_write(&self, call: &ApplicationCall, key: StateKey, value: u64) -> StateWrite {
        StateWrite::Local {
            app_id: self.params.central_app_id,
            account: call.sender,
            key,
            value,
        }
    }

    fn harvest(
        &self,
        group: &HarvestGroup,
        state: &dyn StateSnapshot,
    ) -> Result<Approval, GroupRejected> {
        let (call, transfer) = (&group.app_call, &group.transfer);
        let slot = HarvestGroup::SLOT_TRANSFER;

        self.ensure_central_call(HarvestGroup::SLOT_APP_CALL, call, OnCompletion::NoOp)?;
        ensure_field(slot, "asset_id", &transfer.asset_id, &self.params.funds_asset_id)?;
        ensure_field(slot, "asset_receiver", &transfer.asset_receiver, &call.sender)?;

        let app_id = self.params.central_app_id;
        let investor = state.investor_state(app_id, &call.sender);
        let pending = self
            .calculator
            .pending_harvest(&investor, state.received_total(app_id))?;

        if transfer.asset_amount > pending {
            return Err(GroupRejected::AmountViolation {
                slot,
                amount: transfer.asset_amount,
                bound: AmountBound::AtMost(pending),
            });
        }

        let harvested_total = investor
            .harvested_total
            .checked_add(transfer.asset_amount)
            .ok_or(GroupRejected::Arithmetic("harvested total overflow"))?;

        debug!(
            investor = %call.sender,
            amount = transfer.asset_amount,
            pending,
            "Harvest within entitlement"
        );

        Ok(Approval::stateless(ActionKind::Harvest).with_write(self.local_write(
            call,
            LOCAL_HARVESTED_TOTAL,
            harvested_total,
        )))
    }

    fn unlock(
        &self,
        group: &UnlockGroup,
        state: &dyn StateSnapshot,
    ) -> Result<Approval, GroupRejected> {
        let (call, transfer) = (&group.app_call, &group.transfer);
        let slot = UnlockGroup::SLOT_TRANSFER;

        self.ensure_central_call(UnlockGroup::SLOT_APP_CALL, call, OnCompletion::CloseOut)?;
        ensure_field(slot, "asset_id", &transfer.asset_id, &self.params.share_asset_id)?;
        ensure_field(slot, "asset_receiver", &transfer.asset_receiver, &call.sender)?;

        let shares = state
            .investor_state(self.params.central_app_id, &call.sender)
            .shares;
        if transfer.asset_amount != shares {
            return Err(GroupRejected::AmountViolation {
                slot,
                amount: transfer.asset_amount,
                bound: AmountBound::Exactly(shares),
            });
        }

        // Local state goes away with the ledger's CloseOut
        Ok(Approval::stateless(ActionKind::Unlock))
    }

    /// Locking resets `HarvestedTotal` to the entitlement of the shares held
    /// before the lock. Dividends accrued but not harvested before a lock
    /// become unreachable.
    fn lock(
        &self,
        group: &LockGroup,
        state: &dyn StateSnapshot,
    ) -> Result<Approval, GroupRejected> {
        let (call, transfer) = (&group.app_call, &group.transfer);
        let slot = LockGroup::SLOT_TRANSFER;

        self.ensure_central_call(LockGroup::SLOT_APP_CALL, call, OnCompletion::NoOp)?;
        ensure_same_sender(slot, &transfer.sender, &call.sender)?;
        ensure_field(slot, "asset_id", &transfer.asset_id, &self.params.share_asset_id)?;
        if transfer.asset_amount == 0 {
            return Err(GroupRejected::AmountViolation {
                slot,
                amount: 0,
                bound: AmountBound::AtLeast(1),
            });
        }

        let app_id = self.params.central_app_id;
        let old_shares = state.investor_state(app_id, &call.sender).shares;
        let shares = old_shares
            .checked_add(transfer.asset_amount)
            .ok_or(GroupRejected::Arithmetic("shares overflow"))?;
        let harvested_total = self
            .calculator
            .entitled_total(old_shares, state.received_total(app_id))?;

        Ok(Approval::stateless(ActionKind::Lock)
            .with_write(self.local_write(call, LOCAL_SHARES, shares))
            .with_write(self.local_write(call, LOCAL_HARVESTED_TOTAL, harvested_total)))
    }

    /// Only the capi share transfer (slot 3) is added to `ReceivedTotal`.
    fn drain(
        &self,
        group: &DrainGroup,
        state: &dyn StateSnapshot,
    ) -> Result<Approval, GroupRejected> {
        self.ensure_central_call(
            DrainGroup::SLOT_CENTRAL_APP_CALL,
            &group.central_app_call,
            OnCompletion::NoOp,
        )?;
        let capi_slot = DrainGroup::SLOT_CAPI_APP_CALL;
        ensure_field(
            capi_slot,
            "app_id",
            &group.capi_app_call.app_id,
            &self.params.capi_app_id,
        )?;
        ensure_field(
            capi_slot,
            "on_completion",
            &group.capi_app_call.on_completion,
            &OnCompletion::NoOp,
        )?;
        ensure_same_sender(
            capi_slot,
            &group.capi_app_call.sender,
            &group.central_app_call.sender,
        )?;
        ensure_drained_from_customer_escrow(group, &self.params)?;

        let app_id = self.params.central_app_id;
        let received_total = state
            .received_total(app_id)
            .checked_add(group.capi_share_transfer.asset_amount)
            .ok_or(GroupRejected::Arithmetic("received total overflow"))?;

        Ok(Approval::stateless(ActionKind::Drain).with_write(StateWrite::Global {
            app_id,
            key: GLOBAL_RECEIVED_TOTAL,
            value: received_total,
        }))
    }
}

impl GroupValidator for CentralAppValidator {
    fn name(&self) -> &'static str {
        "central app"
    }

    fn authorize(
        &self,
        action: &Action,
        state: &dyn StateSnapshot,
    ) -> Result<Approval, GroupRejected> {
        match action {
            Action::Create(_) => Ok(Approval::stateless(ActionKind::Create)),
            Action::OptIn(_) => Ok(Approval::stateless(ActionKind::OptIn)),
            Action::Harvest(group) => self.harvest(group, state),
            Action::Unlock(group) => self.unlock(group, state),
            Action::Lock(group) => self.lock(group, state),
            Action::Drain(group) => self.drain(group, state),
            Action::SetupDao(group) => {
                verify_setup_app_call(group, &self.params)?;
                Ok(Approval::stateless(ActionKind::SetupDao))
            }
            Action::Withdrawal(_) => Err(not_authorized(self.name(), action.kind())),
        }
    }
}

//! Central escrow validator
//!
//! Guards the account holding the DAO's funds. It only ever pays out what
//! the central app sanctioned (Harvest) or what the DAO creator withdraws.

use super::setup_dao::verify_setup_dao;
use super::{not_authorized, GroupValidator};
use crate::config::TemplateParameters;
use crate::domain::actions::{Action, ActionKind, HarvestGroup, SetupDaoGroup, WithdrawalGroup};
use crate::domain::effects::Approval;
use crate::domain::errors::GroupRejected;
use crate::domain::invariants::{ensure_field, ensure_safe_transfer};
use crate::domain::value_objects::OnCompletion;
use crate::ports::outbound::StateSnapshot;

pub struct CentralEscrowValidator {
    params: TemplateParameters,
}

impl CentralEscrowValidator {
    pub fn new(params: TemplateParameters) -> Self {
        Self { params }
    }

    fn withdrawal(&self, group: &WithdrawalGroup) -> Result<Approval, GroupRejected> {
        let creator = &self.params.dao_creator;
        ensure_field(
            WithdrawalGroup::SLOT_FEE_PAYMENT,
            "sender",
            &group.fee_payment.sender,
            creator,
        )?;

        let slot = WithdrawalGroup::SLOT_TRANSFER;
        let transfer = &group.transfer;
        ensure_field(slot, "asset_id", &transfer.asset_id, &self.params.funds_asset_id)?;
        ensure_field(slot, "asset_receiver", &transfer.asset_receiver, creator)?;
        ensure_safe_transfer(slot, transfer)?;

        Ok(Approval::stateless(ActionKind::Withdrawal))
    }

    /// Escrow side of Harvest. The amount itself is checked by the central
    /// app, which must be the app called in slot 0.
    fn harvest(&self, group: &HarvestGroup) -> Result<Approval, GroupRejected> {
        let call = &group.app_call;
        let app_slot = HarvestGroup::SLOT_APP_CALL;
        ensure_field(app_slot, "app_id", &call.app_id, &self.params.central_app_id)?;
        ensure_field(app_slot, "on_completion", &call.on_completion, &OnCompletion::NoOp)?;

        let slot = HarvestGroup::SLOT_TRANSFER;
        let transfer = &group.transfer;
        ensure_field(slot, "asset_receiver", &transfer.asset_receiver, &call.sender)?;
        ensure_field(slot, "asset_id", &transfer.asset_id, &self.params.funds_asset_id)?;
        ensure_safe_transfer(slot, transfer)?;

        Ok(Approval::stateless(ActionKind::Harvest))
    }
}

impl GroupValidator for CentralEscrowValidator {
    fn name(&self) -> &'static str {
        "central escrow"
    }

    fn authorize(
        &self,
        action: &Action,
        _state: &dyn StateSnapshot,
    ) -> Result<Approval, GroupRejected> {
        match action {
            Action::SetupDao(group) => {
                verify_setup_dao(group, &self.params, SetupDaoGroup::SLOT_CENTRAL_FUNDS_OPT_IN)?;
                Ok(Approval::stateless(ActionKind::SetupDao))
            }
            Action::Withdrawal(group) => self.withdrawal(group),
            Action::Harvest(group) => self.harvest(group),
            Action::Create(_)
            | Action::OptIn(_)
            | Action::Unlock(_)
            | Action::Lock(_)
            | Action::Drain(_) => Err(not_authorized(self.name(), action.kind())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::StateTables;
    use crate::domain::entities::{
        ApplicationCall, AssetTransfer, Payment, Transaction, TransactionGroup,
    };
    use crate::domain::errors::{AmountBound, RejectionReason};
    use crate::domain::DrainAmounts;
    use crate::fixtures::*;

    fn check(group: &TransactionGroup) -> Result<Approval, GroupRejected> {
        CentralEscrowValidator::new(params()).validate(group, &StateTables::new())
    }

    fn replace(group: &TransactionGroup, slot: usize, tx: Transaction) -> TransactionGroup {
        let mut txs = group.transactions().to_vec();
        txs[slot] = tx;
        TransactionGroup::new(txs)
    }

    #[test]
    fn test_setup_dao_template_is_approved() {
        assert_eq!(
            check(&setup_dao_group()).unwrap(),
            Approval::stateless(ActionKind::SetupDao)
        );
    }

    #[test]
    fn test_setup_dao_payment_must_match_address_arg() {
        let group = replace(
            &setup_dao_group(),
            1,
            Payment::new(dao_creator(), other_investor(), 100_000).into(),
        );
        assert_eq!(check(&group).unwrap_err(), GroupRejected::field(1, "receiver"));
    }

    #[test]
    fn test_setup_dao_app_call_needs_four_args() {
        let call = ApplicationCall::new(dao_creator(), CENTRAL_APP_ID).with_args(
            setup_dao_args()
                .into_iter()
                .take(3)
                .collect::<Vec<_>>(),
        );
        let group = replace(&setup_dao_group(), 0, call.into());
        assert_eq!(check(&group).unwrap_err().reason(), RejectionReason::ShapeMismatch);
    }

    #[test]
    fn test_setup_dao_opt_ins_must_be_zero_amount() {
        let group = replace(
            &setup_dao_group(),
            6,
            AssetTransfer::new(locking_escrow(), CAPI_ASSET_ID, 1, locking_escrow()).into(),
        );
        assert_eq!(
            check(&group).unwrap_err(),
            GroupRejected::AmountViolation {
                slot: 6,
                amount: 1,
                bound: AmountBound::Exactly(0),
            }
        );
    }

    #[test]
    fn test_setup_dao_own_opt_in_must_be_safe() {
        let unsafe_opt_in = AssetTransfer::opt_in(central_escrow(), FUNDS_ASSET_ID).with_fee(1_000);
        let group = replace(&setup_dao_group(), 7, unsafe_opt_in.into());
        assert_eq!(check(&group).unwrap_err(), GroupRejected::safety(7, "fee"));
    }

    #[test]
    fn test_setup_dao_own_opt_in_must_be_funds_asset() {
        let group = replace(
            &setup_dao_group(),
            7,
            AssetTransfer::opt_in(central_escrow(), SHARE_ASSET_ID).into(),
        );
        assert_eq!(check(&group).unwrap_err(), GroupRejected::field(7, "asset_id"));
    }

    #[test]
    fn test_setup_dao_last_transfer_matches_asset_arg() {
        let group = replace(
            &setup_dao_group(),
            9,
            AssetTransfer::new(dao_creator(), CAPI_ASSET_ID, 1, locking_escrow()).into(),
        );
        assert_eq!(check(&group).unwrap_err(), GroupRejected::field(9, "asset_id"));
    }

    #[test]
    fn test_withdrawal_is_approved() {
        assert_eq!(
            check(&withdrawal_group(1_000)).unwrap(),
            Approval::stateless(ActionKind::Withdrawal)
        );
    }

    #[test]
    fn test_withdrawal_fee_payer_must_be_creator() {
        let group = replace(
            &withdrawal_group(1_000),
            0,
            Payment::new(investor(), central_escrow(), 1_000).into(),
        );
        assert_eq!(check(&group).unwrap_err(), GroupRejected::field(0, "sender"));
    }

    #[test]
    fn test_withdrawal_to_someone_else_is_rejected() {
        let group = replace(
            &withdrawal_group(1_000),
            1,
            AssetTransfer::new(central_escrow(), FUNDS_ASSET_ID, 1_000, investor()).into(),
        );
        assert_eq!(
            check(&group).unwrap_err(),
            GroupRejected::field(1, "asset_receiver")
        );
    }

    #[test]
    fn test_withdrawal_safety_fields() {
        let base = AssetTransfer::new(central_escrow(), FUNDS_ASSET_ID, 1_000, dao_creator());
        for (xfer, field) in [
            (base.clone().with_fee(1), "fee"),
            (base.clone().with_close_to(investor()), "asset_close_to"),
            (base.with_rekey_to(investor()), "rekey_to"),
        ] {
            let group = replace(&withdrawal_group(1_000), 1, xfer.into());
            assert_eq!(check(&group).unwrap_err(), GroupRejected::safety(1, field));
        }
    }

    #[test]
    fn test_harvest_escrow_side() {
        assert_eq!(
            check(&harvest_group(investor(), 5)).unwrap(),
            Approval::stateless(ActionKind::Harvest)
        );

        let group = replace(
            &harvest_group(investor(), 5),
            1,
            AssetTransfer::new(central_escrow(), FUNDS_ASSET_ID, 5, investor())
                .with_close_to(other_investor())
                .into(),
        );
        assert_eq!(
            check(&group).unwrap_err().reason(),
            RejectionReason::SafetyFieldViolation
        );
    }

    #[test]
    fn test_harvest_must_call_central_app() {
        let call = ApplicationCall::new(investor(), CAPI_APP_ID).with_arg("harvest");
        let group = replace(&harvest_group(investor(), 5), 0, call.into());
        assert_eq!(check(&group).unwrap_err(), GroupRejected::field(0, "app_id"));
    }

    #[test]
    fn test_other_actions_are_rejected() {
        let groups = [
            lock_group(investor(), 10),
            unlock_group(investor(), 10),
            drain_group(drainer(), DrainAmounts { dao: 9, capi: 1 }),
            opt_in_group(investor()),
        ];
        for group in groups {
            assert_eq!(check(&group).unwrap_err().reason(), RejectionReason::ShapeMismatch);
        }
    }
}

//! Group classification
//!
//! Structural only: group length first, then the member types and the
//! on-completion / argument shape of slot 0. The order of the checks below
//! is part of the protocol because shapes overlap (Harvest, Unlock, Lock
//! and Withdrawal are all two-member groups).
//!
//! ```text
//! len 1  : appl(app_id 0)          -> Create
//!          appl(OptIn)             -> OptIn
//! len 2  : appl(1 arg "harvest")   -> Harvest
//!          appl(1 arg "unlock")    -> Unlock
//!          appl(0 args)            -> Lock
//!          pay + axfer             -> Withdrawal
//! len 4  : appl appl axfer axfer   -> Drain
//! len 10 : appl pay*4 axfer*5      -> SetupDao
//! ```

use super::actions::{
    Action, CreateGroup, DrainGroup, HarvestGroup, LockGroup, OptInGroup, SetupDaoGroup,
    UnlockGroup, WithdrawalGroup, DRAIN_GROUP_SIZE, PAIR_GROUP_SIZE, SETUP_DAO_GROUP_SIZE,
    SINGLE_GROUP_SIZE,
};
use super::entities::{ApplicationCall, AssetTransfer, Payment, Transaction, TransactionGroup};
use super::errors::GroupRejected;
use super::value_objects::{OnCompletion, TxKind, ARG_HARVEST, ARG_UNLOCK};
use tracing::trace;

/// Selects the one protocol action a group is an instance of.
///
/// Stateless: the same group always classifies the same way, whichever
/// validator asks.
#[derive(Clone, Copy, Debug, Default)]
pub struct GroupClassifier;

impl GroupClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify `group`, or reject it as a shape mismatch.
    pub fn classify(&self, group: &TransactionGroup) -> Result<Action, GroupRejected> {
        let action = match group.len() {
            SINGLE_GROUP_SIZE => classify_single(group)?,
            PAIR_GROUP_SIZE => classify_pair(group)?,
            DRAIN_GROUP_SIZE => classify_drain(group)?,
            SETUP_DAO_GROUP_SIZE => classify_setup_dao(group)?,
            len => {
                return Err(GroupRejected::shape(format!(
                    "no action has group length {len}"
                )))
            }
        };

        trace!(action = %action.kind(), size = group.len(), "Classified group");
        Ok(action)
    }
}

fn classify_single(group: &TransactionGroup) -> Result<Action, GroupRejected> {
    let call = app_call_at(group, 0)?;

    if call.app_id == 0 {
        return Ok(Action::Create(CreateGroup {
            app_call: call.clone(),
        }));
    }
    if call.on_completion == OnCompletion::OptIn {
        return Ok(Action::OptIn(OptInGroup {
            app_call: call.clone(),
        }));
    }

    Err(GroupRejected::shape(format!(
        "single app call with on-completion {:?} is neither create nor opt-in",
        call.on_completion
    )))
}

fn classify_pair(group: &TransactionGroup) -> Result<Action, GroupRejected> {
    let first = slot(group, 0)?;

    match first {
        Transaction::ApplicationCall(call) => match call.args.as_slice() {
            [arg] if arg.as_slice() == ARG_HARVEST => Ok(Action::Harvest(HarvestGroup {
                app_call: call.clone(),
                transfer: asset_transfer_at(group, HarvestGroup::SLOT_TRANSFER)?.clone(),
            })),
            [arg] if arg.as_slice() == ARG_UNLOCK => Ok(Action::Unlock(UnlockGroup {
                app_call: call.clone(),
                transfer: asset_transfer_at(group, UnlockGroup::SLOT_TRANSFER)?.clone(),
            })),
            [_] => Err(GroupRejected::shape("unknown app call argument")),
            [] => Ok(Action::Lock(LockGroup {
                app_call: call.clone(),
                transfer: asset_transfer_at(group, LockGroup::SLOT_TRANSFER)?.clone(),
            })),
            args => Err(GroupRejected::shape(format!(
                "two-member group with {} app call arguments",
                args.len()
            ))),
        },
        Transaction::Payment(fee_payment) => Ok(Action::Withdrawal(WithdrawalGroup {
            fee_payment: fee_payment.clone(),
            transfer: asset_transfer_at(group, WithdrawalGroup::SLOT_TRANSFER)?.clone(),
        })),
        Transaction::AssetTransfer(_) => Err(unexpected_kind(0, TxKind::ApplicationCall, first)),
    }
}

fn classify_drain(group: &TransactionGroup) -> Result<Action, GroupRejected> {
    Ok(Action::Drain(DrainGroup {
        central_app_call: app_call_at(group, DrainGroup::SLOT_CENTRAL_APP_CALL)?.clone(),
        capi_app_call: app_call_at(group, DrainGroup::SLOT_CAPI_APP_CALL)?.clone(),
        drain_transfer: asset_transfer_at(group, DrainGroup::SLOT_DRAIN_TRANSFER)?.clone(),
        capi_share_transfer: asset_transfer_at(group, DrainGroup::SLOT_CAPI_SHARE_TRANSFER)?
            .clone(),
    }))
}

fn classify_setup_dao(group: &TransactionGroup) -> Result<Action, GroupRejected> {
    let pay = |i: usize| payment_at(group, SetupDaoGroup::SLOT_FIRST_PAYMENT + i).cloned();
    let opt_in =
        |i: usize| asset_transfer_at(group, SetupDaoGroup::SLOT_FIRST_OPT_IN + i).cloned();

    Ok(Action::SetupDao(Box::new(SetupDaoGroup {
        app_call: app_call_at(group, SetupDaoGroup::SLOT_APP_CALL)?.clone(),
        payments: [pay(0)?, pay(1)?, pay(2)?, pay(3)?],
        opt_ins: [opt_in(0)?, opt_in(1)?, opt_in(2)?, opt_in(3)?],
        asset_transfer: asset_transfer_at(group, SetupDaoGroup::SLOT_ASSET_TRANSFER)?.clone(),
    })))
}

fn slot(group: &TransactionGroup, slot: usize) -> Result<&Transaction, GroupRejected> {
    group
        .get(slot)
        .ok_or_else(|| GroupRejected::shape(format!("missing slot {slot}")))
}

fn app_call_at(group: &TransactionGroup, i: usize) -> Result<&ApplicationCall, GroupRejected> {
    let tx = slot(group, i)?;
    tx.as_app_call()
        .ok_or_else(|| unexpected_kind(i, TxKind::ApplicationCall, tx))
}

fn payment_at(group: &TransactionGroup, i: usize) -> Result<&Payment, GroupRejected> {
    let tx = slot(group, i)?;
    tx.as_payment()
        .ok_or_else(|| unexpected_kind(i, TxKind::Payment, tx))
}

fn asset_transfer_at(group: &TransactionGroup, i: usize) -> Result<&AssetTransfer, GroupRejected> {
    let tx = slot(group, i)?;
    tx.as_asset_transfer()
        .ok_or_else(|| unexpected_kind(i, TxKind::AssetTransfer, tx))
}

fn unexpected_kind(slot: usize, expected: TxKind, got: &Transaction) -> GroupRejected {
    GroupRejected::shape(format!(
        "slot {slot}: expected {expected}, got {}",
        got.kind()
    ))
}

//! SetupDao template shared by both escrows.
//!
//! The escrows differ only in which funds-asset opt-in is their own.

use crate::config::TemplateParameters;
use crate::domain::actions::SetupDaoGroup;
use crate::domain::errors::{AmountBound, GroupRejected};
use crate::domain::invariants::{ensure_field, ensure_safe_transfer};
use crate::domain::value_objects::{btoi, Address, OnCompletion};

/// Opt-ins other than the escrow's own (slots 5, 6 and the other escrow's)
/// are only checked for a zero amount; their assets are not inspected.
pub(crate) fn verify_setup_dao(
    group: &SetupDaoGroup,
    params: &TemplateParameters,
    own_opt_in_slot: usize,
) -> Result<(), GroupRejected> {
    verify_setup_app_call(group, params)?;

    let call = &group.app_call;
    for (i, arg_index) in [0usize, 1].into_iter().enumerate() {
        let slot = SetupDaoGroup::SLOT_FIRST_PAYMENT + i;
        let expected = call
            .arg(arg_index)
            .and_then(Address::from_slice)
            .ok_or_else(|| GroupRejected::field(SetupDaoGroup::SLOT_APP_CALL, "address arg"))?;
        ensure_field(slot, "receiver", &group.payments[i].receiver, &expected)?;
    }

    for (i, opt_in) in group.opt_ins.iter().enumerate() {
        let slot = SetupDaoGroup::SLOT_FIRST_OPT_IN + i;
        if opt_in.asset_amount != 0 {
            return Err(GroupRejected::AmountViolation {
                slot,
                amount: opt_in.asset_amount,
                bound: AmountBound::Exactly(0),
            });
        }
    }

    let own = group
        .opt_in_at(own_opt_in_slot)
        .ok_or_else(|| GroupRejected::shape(format!("slot {own_opt_in_slot} is not an opt-in")))?;
    ensure_field(own_opt_in_slot, "asset_id", &own.asset_id, &params.funds_asset_id)?;
    ensure_safe_transfer(own_opt_in_slot, own)?;

    let asset_id = call
        .arg(2)
        .and_then(btoi)
        .ok_or_else(|| GroupRejected::field(SetupDaoGroup::SLOT_APP_CALL, "asset id arg"))?;
    ensure_field(
        SetupDaoGroup::SLOT_ASSET_TRANSFER,
        "asset_id",
        &group.asset_transfer.asset_id,
        &asset_id,
    )
}

/// Slot 0 of SetupDao: a NoOp call to the central app with four arguments.
pub(crate) fn verify_setup_app_call(
    group: &SetupDaoGroup,
    params: &TemplateParameters,
) -> Result<(), GroupRejected> {
    let call = &group.app_call;
    let slot = SetupDaoGroup::SLOT_APP_CALL;

    ensure_field(slot, "on_completion", &call.on_completion, &OnCompletion::NoOp)?;
    ensure_field(slot, "app_id", &call.app_id, &params.central_app_id)?;
    if call.args.len() != SetupDaoGroup::APP_ARG_COUNT {
        return Err(GroupRejected::shape(format!(
            "setup app call has {} arguments, expected {}",
            call.args.len(),
            SetupDaoGroup::APP_ARG_COUNT
        )));
    }
    Ok(())
}

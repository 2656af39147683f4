//! Test fixtures: one deployment and well-formed groups for every action.

use crate::config::{TemplateParameters, DEFAULT_PRECISION};
use crate::domain::drain::DrainAmounts;
use crate::domain::entities::{
    ApplicationCall, AssetTransfer, Payment, Transaction, TransactionGroup,
};
use crate::domain::value_objects::{
    Address, Amount, AppId, AssetId, OnCompletion, ARG_HARVEST, ARG_UNLOCK,
};

pub const FUNDS_ASSET_ID: AssetId = 10;
pub const SHARE_ASSET_ID: AssetId = 11;
pub const CAPI_ASSET_ID: AssetId = 12;
pub const CENTRAL_APP_ID: AppId = 100;
pub const CAPI_APP_ID: AppId = 200;
pub const SHARE_SUPPLY: u64 = 1_000_000_000;
/// 10% at the default precision.
pub const CAPI_SHARE: u64 = 100_000;

pub fn dao_creator() -> Address {
    Address::new([0x01; 32])
}

pub fn central_escrow() -> Address {
    Address::new([0x02; 32])
}

pub fn customer_escrow() -> Address {
    Address::new([0x03; 32])
}

pub fn capi_escrow() -> Address {
    Address::new([0x04; 32])
}

/// Holds locked shares. Not a template parameter, the central app only
/// sees it as a transfer counterparty.
pub fn locking_escrow() -> Address {
    Address::new([0x05; 32])
}

pub fn investor() -> Address {
    Address::new([0x10; 32])
}

pub fn other_investor() -> Address {
    Address::new([0x11; 32])
}

pub fn drainer() -> Address {
    Address::new([0x20; 32])
}

pub fn params() -> TemplateParameters {
    TemplateParameters {
        funds_asset_id: FUNDS_ASSET_ID,
        share_asset_id: SHARE_ASSET_ID,
        capi_asset_id: CAPI_ASSET_ID,
        central_app_id: CENTRAL_APP_ID,
        capi_app_id: CAPI_APP_ID,
        dao_creator: dao_creator(),
        central_escrow: central_escrow(),
        customer_escrow: customer_escrow(),
        capi_escrow: capi_escrow(),
        precision: DEFAULT_PRECISION,
        share_supply: SHARE_SUPPLY,
        capi_share: CAPI_SHARE,
        investors_share: 400_000,
        share_price: 5_000_000,
    }
}

pub fn create_group(sender: Address) -> TransactionGroup {
    TransactionGroup::new(vec![ApplicationCall::new(sender, 0).into()])
}

pub fn opt_in_group(sender: Address) -> TransactionGroup {
    TransactionGroup::new(vec![ApplicationCall::new(sender, CENTRAL_APP_ID)
        .with_on_completion(OnCompletion::OptIn)
        .into()])
}

/// Central escrow pays `amount` of the funds asset to `investor`.
pub fn harvest_group(investor: Address, amount: Amount) -> TransactionGroup {
    TransactionGroup::new(vec![
        ApplicationCall::new(investor, CENTRAL_APP_ID)
            .with_arg(ARG_HARVEST)
            .into(),
        AssetTransfer::new(central_escrow(), FUNDS_ASSET_ID, amount, investor).into(),
    ])
}

/// Locking escrow returns `amount` shares while the investor closes out.
pub fn unlock_group(investor: Address, amount: Amount) -> TransactionGroup {
    TransactionGroup::new(vec![
        ApplicationCall::new(investor, CENTRAL_APP_ID)
            .with_on_completion(OnCompletion::CloseOut)
            .with_arg(ARG_UNLOCK)
            .into(),
        AssetTransfer::new(locking_escrow(), SHARE_ASSET_ID, amount, investor).into(),
    ])
}

/// Investor sends `amount` shares to the locking escrow.
pub fn lock_group(investor: Address, amount: Amount) -> TransactionGroup {
    TransactionGroup::new(vec![
        ApplicationCall::new(investor, CENTRAL_APP_ID).into(),
        AssetTransfer::new(investor, SHARE_ASSET_ID, amount, locking_escrow()).into(),
    ])
}

pub fn drain_group(drainer: Address, amounts: DrainAmounts) -> TransactionGroup {
    TransactionGroup::new(vec![
        ApplicationCall::new(drainer, CENTRAL_APP_ID).into(),
        ApplicationCall::new(drainer, CAPI_APP_ID).into(),
        AssetTransfer::new(customer_escrow(), FUNDS_ASSET_ID, amounts.dao, central_escrow()).into(),
        AssetTransfer::new(customer_escrow(), FUNDS_ASSET_ID, amounts.capi, capi_escrow()).into(),
    ])
}

/// Central escrow address, customer escrow address, share asset id, and a
/// trailing argument the escrows do not inspect.
pub fn setup_dao_args() -> Vec<Vec<u8>> {
    vec![
        central_escrow().as_bytes().to_vec(),
        customer_escrow().as_bytes().to_vec(),
        SHARE_ASSET_ID.to_be_bytes().to_vec(),
        b"setup".to_vec(),
    ]
}

pub fn setup_dao_group() -> TransactionGroup {
    let creator = dao_creator();
    let mut txs: Vec<Transaction> = vec![ApplicationCall::new(creator, CENTRAL_APP_ID)
        .with_args(setup_dao_args())
        .into()];

    for receiver in [central_escrow(), customer_escrow(), locking_escrow(), capi_escrow()] {
        txs.push(Payment::new(creator, receiver, 100_000).into());
    }

    txs.push(AssetTransfer::opt_in(locking_escrow(), SHARE_ASSET_ID).into());
    txs.push(AssetTransfer::opt_in(locking_escrow(), CAPI_ASSET_ID).into());
    txs.push(AssetTransfer::opt_in(central_escrow(), FUNDS_ASSET_ID).into());
    txs.push(AssetTransfer::opt_in(customer_escrow(), FUNDS_ASSET_ID).into());

    txs.push(AssetTransfer::new(creator, SHARE_ASSET_ID, SHARE_SUPPLY, locking_escrow()).into());
    TransactionGroup::new(txs)
}

/// Creator covers the fee, central escrow pays out `amount` to the creator.
pub fn withdrawal_group(amount: Amount) -> TransactionGroup {
    TransactionGroup::new(vec![
        Payment::new(dao_creator(), central_escrow(), 1_000).into(),
        AssetTransfer::new(central_escrow(), FUNDS_ASSET_ID, amount, dao_creator()).into(),
    ])
}

//! Protocol actions as parsed, typed groups
//!
//! The classifier turns a raw group into exactly one `Action`; validators
//! then work on named members instead of indexing positions. The `SLOT_*`
//! constants record where each member sits in the wire layout and are used
//! for diagnostics only.

use super::entities::{ApplicationCall, AssetTransfer, Payment};
use std::fmt;

/// Group sizes that identify actions.
pub const SINGLE_GROUP_SIZE: usize = 1;
pub const PAIR_GROUP_SIZE: usize = 2;
pub const DRAIN_GROUP_SIZE: usize = 4;
pub const SETUP_DAO_GROUP_SIZE: usize = 10;

/// Self-creating application call (`app_id == 0`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateGroup {
    pub app_call: ApplicationCall,
}

/// Application opt-in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptInGroup {
    pub app_call: ApplicationCall,
}

/// `[app call("harvest"), funds transfer to the caller]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HarvestGroup {
    pub app_call: ApplicationCall,
    pub transfer: AssetTransfer,
}

impl HarvestGroup {
    pub const SLOT_APP_CALL: usize = 0;
    pub const SLOT_TRANSFER: usize = 1;
}

/// `[app call("unlock", CloseOut), shares transfer back to the caller]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnlockGroup {
    pub app_call: ApplicationCall,
    pub transfer: AssetTransfer,
}

impl UnlockGroup {
    pub const SLOT_APP_CALL: usize = 0;
    pub const SLOT_TRANSFER: usize = 1;
}

/// `[app call (no args), shares transfer from the caller]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LockGroup {
    pub app_call: ApplicationCall,
    pub transfer: AssetTransfer,
}

impl LockGroup {
    pub const SLOT_APP_CALL: usize = 0;
    pub const SLOT_TRANSFER: usize = 1;
}

/// `[central app call, capi app call, drain transfer, capi share transfer]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrainGroup {
    pub central_app_call: ApplicationCall,
    pub capi_app_call: ApplicationCall,
    pub drain_transfer: AssetTransfer,
    pub capi_share_transfer: AssetTransfer,
}

impl DrainGroup {
    pub const SLOT_CENTRAL_APP_CALL: usize = 0;
    pub const SLOT_CAPI_APP_CALL: usize = 1;
    pub const SLOT_DRAIN_TRANSFER: usize = 2;
    pub const SLOT_CAPI_SHARE_TRANSFER: usize = 3;
}

/// Ten-member bundle that funds the escrows and opts them into every asset
/// they will ever move.
///
/// ```text
/// 0      app call (4 args: addr, addr, asset id, extra)
/// 1..=4  payments (1 -> arg 0, 2 -> arg 1)
/// 5..=8  zero-amount opt-ins (7: central escrow funds, 8: customer escrow funds)
/// 9      transfer of the asset named by arg 2
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetupDaoGroup {
    pub app_call: ApplicationCall,
    pub payments: [Payment; 4],
    pub opt_ins: [AssetTransfer; 4],
    pub asset_transfer: AssetTransfer,
}

impl SetupDaoGroup {
    pub const SLOT_APP_CALL: usize = 0;
    pub const SLOT_FIRST_PAYMENT: usize = 1;
    pub const SLOT_FIRST_OPT_IN: usize = 5;
    pub const SLOT_CENTRAL_FUNDS_OPT_IN: usize = 7;
    pub const SLOT_CUSTOMER_FUNDS_OPT_IN: usize = 8;
    pub const SLOT_ASSET_TRANSFER: usize = 9;
    pub const APP_ARG_COUNT: usize = 4;

    /// Opt-in member at absolute group slot `slot` (5..=8).
    pub fn opt_in_at(&self, slot: usize) -> Option<&AssetTransfer> {
        slot.checked_sub(Self::SLOT_FIRST_OPT_IN)
            .and_then(|i| self.opt_ins.get(i))
    }
}

/// `[fee payment by the DAO creator, funds transfer to the DAO creator]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawalGroup {
    pub fee_payment: Payment,
    pub transfer: AssetTransfer,
}

impl WithdrawalGroup {
    pub const SLOT_FEE_PAYMENT: usize = 0;
    pub const SLOT_TRANSFER: usize = 1;
}

/// The single protocol action a group is an instance of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Create(CreateGroup),
    OptIn(OptInGroup),
    Harvest(HarvestGroup),
    Unlock(UnlockGroup),
    Lock(LockGroup),
    Drain(DrainGroup),
    SetupDao(Box<SetupDaoGroup>),
    Withdrawal(WithdrawalGroup),
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Create(_) => ActionKind::Create,
            Action::OptIn(_) => ActionKind::OptIn,
            Action::Harvest(_) => ActionKind::Harvest,
            Action::Unlock(_) => ActionKind::Unlock,
            Action::Lock(_) => ActionKind::Lock,
            Action::Drain(_) => ActionKind::Drain,
            Action::SetupDao(_) => ActionKind::SetupDao,
            Action::Withdrawal(_) => ActionKind::Withdrawal,
        }
    }
}

/// Payload-free tag of an [`Action`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Create,
    OptIn,
    Harvest,
    Unlock,
    Lock,
    Drain,
    SetupDao,
    Withdrawal,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionKind::Create => "create",
            ActionKind::OptIn => "opt-in",
            ActionKind::Harvest => "harvest",
            ActionKind::Unlock => "unlock",
            ActionKind::Lock => "lock",
            ActionKind::Drain => "drain",
            ActionKind::SetupDao => "setup-dao",
            ActionKind::Withdrawal => "withdrawal",
        };
        f.write_str(name)
    }
}

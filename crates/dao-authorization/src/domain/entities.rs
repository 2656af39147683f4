//! Core entities: transactions and atomic transaction groups.

use super::value_objects::{Address, Amount, AppId, AssetId, OnCompletion, TxKind};
use serde::{Deserialize, Serialize};

/// Call into a stateful application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationCall {
    pub sender: Address,
    pub app_id: AppId,
    pub on_completion: OnCompletion,
    pub args: Vec<Vec<u8>>,
}

impl ApplicationCall {
    /// NoOp call without arguments.
    pub fn new(sender: Address, app_id: AppId) -> Self {
        Self {
            sender,
            app_id,
            on_completion: OnCompletion::NoOp,
            args: Vec::new(),
        }
    }

    pub fn with_on_completion(mut self, on_completion: OnCompletion) -> Self {
        self.on_completion = on_completion;
        self
    }

    pub fn with_arg(mut self, arg: impl Into<Vec<u8>>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Vec<u8>>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Argument at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&[u8]> {
        self.args.get(index).map(Vec::as_slice)
    }
}

/// Native currency payment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub sender: Address,
    pub receiver: Address,
    pub amount: Amount,
    pub fee: Amount,
}

impl Payment {
    pub fn new(sender: Address, receiver: Address, amount: Amount) -> Self {
        Self {
            sender,
            receiver,
            amount,
            fee: 0,
        }
    }

    pub fn with_fee(mut self, fee: Amount) -> Self {
        self.fee = fee;
        self
    }
}

/// Asset transfer (also used for zero-amount opt-ins).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTransfer {
    pub sender: Address,
    pub asset_id: AssetId,
    pub asset_amount: Amount,
    pub asset_receiver: Address,
    pub asset_close_to: Address,
    pub fee: Amount,
    pub rekey_to: Address,
}

impl AssetTransfer {
    /// Transfer with zero fee and no close-to / rekey-to.
    pub fn new(sender: Address, asset_id: AssetId, amount: Amount, receiver: Address) -> Self {
        Self {
            sender,
            asset_id,
            asset_amount: amount,
            asset_receiver: receiver,
            asset_close_to: Address::ZERO,
            fee: 0,
            rekey_to: Address::ZERO,
        }
    }

    /// Zero-amount self transfer, the ledger's asset opt-in.
    pub fn opt_in(account: Address, asset_id: AssetId) -> Self {
        Self::new(account, asset_id, 0, account)
    }

    pub fn with_fee(mut self, fee: Amount) -> Self {
        self.fee = fee;
        self
    }

    pub fn with_close_to(mut self, close_to: Address) -> Self {
        self.asset_close_to = close_to;
        self
    }

    pub fn with_rekey_to(mut self, rekey_to: Address) -> Self {
        self.rekey_to = rekey_to;
        self
    }
}

/// A single group member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transaction {
    ApplicationCall(ApplicationCall),
    Payment(Payment),
    AssetTransfer(AssetTransfer),
}

impl Transaction {
    pub fn kind(&self) -> TxKind {
        match self {
            Transaction::ApplicationCall(_) => TxKind::ApplicationCall,
            Transaction::Payment(_) => TxKind::Payment,
            Transaction::AssetTransfer(_) => TxKind::AssetTransfer,
        }
    }

    pub fn sender(&self) -> &Address {
        match self {
            Transaction::ApplicationCall(call) => &call.sender,
            Transaction::Payment(pay) => &pay.sender,
            Transaction::AssetTransfer(xfer) => &xfer.sender,
        }
    }

    pub fn as_app_call(&self) -> Option<&ApplicationCall> {
        match self {
            Transaction::ApplicationCall(call) => Some(call),
            _ => None,
        }
    }

    pub fn as_payment(&self) -> Option<&Payment> {
        match self {
            Transaction::Payment(pay) => Some(pay),
            _ => None,
        }
    }

    pub fn as_asset_transfer(&self) -> Option<&AssetTransfer> {
        match self {
            Transaction::AssetTransfer(xfer) => Some(xfer),
            _ => None,
        }
    }
}

impl From<ApplicationCall> for Transaction {
    fn from(call: ApplicationCall) -> Self {
        Transaction::ApplicationCall(call)
    }
}

impl From<Payment> for Transaction {
    fn from(pay: Payment) -> Self {
        Transaction::Payment(pay)
    }
}

impl From<AssetTransfer> for Transaction {
    fn from(xfer: AssetTransfer) -> Self {
        Transaction::AssetTransfer(xfer)
    }
}

/// Ordered, atomically committed batch of transactions.
///
/// Position is part of the protocol: members are never reordered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionGroup {
    transactions: Vec<Transaction>,
}

impl TransactionGroup {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&Transaction> {
        self.transactions.get(slot)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Whether `account` sends any member of the group.
    pub fn is_signed_by(&self, account: &Address) -> bool {
        self.transactions.iter().any(|tx| tx.sender() == account)
    }

    /// Whether any member calls application `app_id`.
    pub fn calls_app(&self, app_id: AppId) -> bool {
        self.transactions
            .iter()
            .filter_map(Transaction::as_app_call)
            .any(|call| call.app_id == app_id)
    }
}

impl FromIterator<Transaction> for TransactionGroup {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

//! Value objects for group authorization
//!
//! Identifiers, addresses and the persisted state keys shared by every
//! validator.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Application (stateful contract) identifier. `0` means "being created".
pub type AppId = u64;
/// Asset identifier.
pub type AssetId = u64;
/// Asset or fee amount in base units.
pub type Amount = u64;

/// 32-byte account address.
///
/// Serialized as a lowercase hex string so template parameters stay
/// readable in JSON.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// The zero address. Close-to and rekey-to fields must hold it
    /// wherever moving funds out of an escrow is being authorized.
    pub const ZERO: Address = Address([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Interpret raw bytes (e.g. an app call argument) as an address.
    ///
    /// Returns `None` unless exactly 32 bytes are given.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let array: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s.trim_start_matches("0x"), &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form keeps rejection logs readable
        write!(f, "Address({}..)", &self.to_hex()[..8])
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// What happens to the caller's local state after an application call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OnCompletion {
    #[default]
    NoOp,
    OptIn,
    CloseOut,
}

/// Transaction type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TxKind {
    ApplicationCall,
    Payment,
    AssetTransfer,
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TxKind::ApplicationCall => "appl",
            TxKind::Payment => "pay",
            TxKind::AssetTransfer => "axfer",
        };
        f.write_str(name)
    }
}

/// Key of an integer entry in application state.
///
/// The byte strings are the persisted layout and must not change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(pub &'static str);

impl StateKey {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Global: total funds accounted to the registry so far.
pub const GLOBAL_RECEIVED_TOTAL: StateKey = StateKey("ReceivedTotal");
/// Local: shares locked by the account.
pub const LOCAL_SHARES: StateKey = StateKey("Shares");
/// Local: funds already harvested by the account.
pub const LOCAL_HARVESTED_TOTAL: StateKey = StateKey("HarvestedTotal");

/// Argument literal selecting the Harvest action.
pub const ARG_HARVEST: &[u8] = b"harvest";
/// Argument literal selecting the Unlock action.
pub const ARG_UNLOCK: &[u8] = b"unlock";

/// Decode an app call argument as a big-endian unsigned integer.
///
/// Empty input decodes to 0; anything longer than 8 bytes does not fit and
/// yields `None`.
pub fn btoi(bytes: &[u8]) -> Option<u64> {
    if bytes.len() > 8 {
        return None;
    }
    Some(bytes.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b)))
}

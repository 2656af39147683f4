//! Error types for group authorization
//!
//! Every failed assertion rejects the whole group. The variants only exist
//! to make rejections diagnosable; the protocol itself does not tell them
//! apart.

use super::value_objects::{Amount, StateKey};
use std::fmt;
use thiserror::Error;

/// Diagnostic category of a rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectionReason {
    /// Group length, member type or argument count matches no action.
    ShapeMismatch,
    /// Sender / receiver / asset id / on-completion assertion failed.
    FieldMismatch,
    /// Amount above entitlement, not the exact required amount, or not positive.
    AmountViolation,
    /// Non-zero fee, or close-to / rekey-to set where forbidden.
    SafetyFieldViolation,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RejectionReason::ShapeMismatch => "shape-mismatch",
            RejectionReason::FieldMismatch => "field-mismatch",
            RejectionReason::AmountViolation => "amount-violation",
            RejectionReason::SafetyFieldViolation => "safety-field-violation",
        };
        f.write_str(name)
    }
}

/// Bound an amount was checked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmountBound {
    AtMost(Amount),
    Exactly(Amount),
    AtLeast(Amount),
}

impl fmt::Display for AmountBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AmountBound::AtMost(v) => write!(f, "<= {v}"),
            AmountBound::Exactly(v) => write!(f, "== {v}"),
            AmountBound::AtLeast(v) => write!(f, ">= {v}"),
        }
    }
}

/// A proposed group is not a legal instance of any protocol action
/// (or not of one this validator authorizes).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GroupRejected {
    #[error("shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("field mismatch at slot {slot}: {field}")]
    FieldMismatch { slot: usize, field: &'static str },

    #[error("amount violation at slot {slot}: {amount} not {bound}")]
    AmountViolation {
        slot: usize,
        amount: Amount,
        bound: AmountBound,
    },

    #[error("safety field violation at slot {slot}: {field}")]
    SafetyFieldViolation { slot: usize, field: &'static str },

    /// Overflow, underflow or division by zero. Never clamped.
    #[error("arithmetic fault: {0}")]
    Arithmetic(&'static str),
}

impl GroupRejected {
    pub fn shape(detail: impl Into<String>) -> Self {
        GroupRejected::ShapeMismatch(detail.into())
    }

    pub fn field(slot: usize, field: &'static str) -> Self {
        GroupRejected::FieldMismatch { slot, field }
    }

    pub fn safety(slot: usize, field: &'static str) -> Self {
        GroupRejected::SafetyFieldViolation { slot, field }
    }

    pub fn reason(&self) -> RejectionReason {
        match self {
            GroupRejected::ShapeMismatch(_) => RejectionReason::ShapeMismatch,
            GroupRejected::FieldMismatch { .. } => RejectionReason::FieldMismatch,
            GroupRejected::AmountViolation { .. } | GroupRejected::Arithmetic(_) => {
                RejectionReason::AmountViolation
            }
            GroupRejected::SafetyFieldViolation { .. } => RejectionReason::SafetyFieldViolation,
        }
    }
}

/// State store failures.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("{key} must not decrease: {current} -> {proposed}")]
    NonMonotonic {
        key: StateKey,
        current: u64,
        proposed: u64,
    },

    #[error("storage error: {0}")]
    Storage(String),
}

/// Template parameter loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("precision must be positive")]
    ZeroPrecision,

    #[error("share supply must be positive")]
    ZeroShareSupply,

    #[error("{name} exceeds precision: {value} > {precision}")]
    ShareAbovePrecision {
        name: &'static str,
        value: u64,
        precision: u64,
    },

    #[error("escrow addresses must be distinct: {0}")]
    DuplicateEscrow(&'static str),

    #[error("failed to parse template parameters: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors surfaced by the authorization service.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AuthorizationError {
    #[error("group rejected: {0}")]
    Rejected(#[from] GroupRejected),

    #[error("state commit failed: {0}")]
    State(#[from] StateError),
}

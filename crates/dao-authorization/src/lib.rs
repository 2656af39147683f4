//! # DAO Group Authorization
//!
//! Authorization rules for a dividend-sharing DAO on an account-based
//! ledger with atomic transaction groups. A group is admitted only when
//! every participating account approves it: the central app (investor
//! registry), the capi app (platform registry) and the two escrows.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Actions
//!
//! | Action | Group size | Validators |
//! |--------|-----------|------------|
//! | Create / OptIn | 1 | central app, capi app |
//! | Harvest | 2 | central app, central escrow |
//! | Unlock / Lock | 2 | central app |
//! | Withdrawal | 2 | central escrow |
//! | Drain | 4 | central app, capi app, customer escrow |
//! | SetupDao | 10 | central app, central escrow, customer escrow |
//!
//! ## Module Structure
//!
//! ```text
//! dao-authorization/
//! ├── domain/          # Transactions, classifier, entitlement, invariants
//! ├── validators/      # One GroupValidator per authorizing account
//! ├── ports/           # API trait (inbound) + state traits (outbound)
//! ├── adapters/        # InMemoryStateStore
//! ├── application/     # GroupAuthorizationService
//! └── config.rs        # TemplateParameters
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
#[cfg(any(test, feature = "test-utils"))]
pub mod fixtures;
pub mod ports;
pub mod validators;

// Re-exports
pub use adapters::{InMemoryStateStore, StateTables};
pub use application::{Admission, GroupAuthorizationService, ServiceStats};
pub use config::{TemplateParameters, DEFAULT_PRECISION};
pub use domain::{
    Action, ActionKind, Address, Amount, AppId, ApplicationCall, Approval, AssetId,
    AssetTransfer, AuthorizationError, ConfigError, DrainAmounts, EntitlementCalculator,
    GroupClassifier, GroupRejected, InvestorState, OnCompletion, Payment, RejectionReason,
    StateError, StateKey, StateWrite, Transaction, TransactionGroup, GLOBAL_RECEIVED_TOTAL,
    LOCAL_HARVESTED_TOTAL, LOCAL_SHARES,
};
pub use ports::inbound::GroupAuthorizationApi;
pub use ports::outbound::{AppStateStore, StateSnapshot};
pub use validators::{
    CapiAppValidator, CentralAppValidator, CentralEscrowValidator, CustomerEscrowValidator,
    GroupValidator,
};

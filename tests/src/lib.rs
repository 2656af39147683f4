//! # Capi DAO Test Suite
//!
//! Cross-validator flows run through `GroupAuthorizationService`, the way
//! a host ledger would evaluate them.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── flows.rs      # Full DAO lifecycle
//!     └── attacks.rs    # Groups that try to move funds illegitimately
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p dao-tests
//! cargo test -p dao-tests integration::attacks::
//! ```

pub mod integration;

//! # Application Module
//!
//! The authorization service orchestrating the validators and the state
//! store.

pub mod service;

pub use service::{Admission, GroupAuthorizationService, ServiceStats};

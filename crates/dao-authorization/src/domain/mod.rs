//! # Domain Layer (Inner Hexagon)
//!
//! Pure authorization logic: entities, group classification, the
//! entitlement formula and invariants. No I/O.

pub mod actions;
pub mod classifier;
pub mod drain;
pub mod effects;
pub mod entitlement;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use actions::*;
pub use classifier::GroupClassifier;
pub use drain::DrainAmounts;
pub use effects::*;
pub use entitlement::*;
pub use entities::*;
pub use errors::*;
pub use value_objects::*;

//! # Adapters Layer (Outer Hexagon)
//!
//! Adapters implement the driven ports.

pub mod memory_store;

pub use memory_store::*;

//! # Ports Layer (Middle Hexagon)
//!
//! - **Driving Port (Inbound)**: `GroupAuthorizationApi`
//! - **Driven Ports (Outbound)**: `StateSnapshot`, `AppStateStore`

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;

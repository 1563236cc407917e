//! Ports layer for the Entity Store (Hexagonal Architecture)
//!
//! - `inbound`: API exposed to the ticketing subsystem and the runtime
//! - `outbound`: clock dependency

pub mod inbound;
pub mod outbound;

pub use inbound::EntityStoreApi;
pub use outbound::TimeSource;

//! Adapters for the Entity Store's outbound ports

pub mod time;

pub use time::{FixedTimeSource, SystemTimeSource};

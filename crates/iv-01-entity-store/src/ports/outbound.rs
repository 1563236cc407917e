//! Outbound ports for the Entity Store.

use chrono::{DateTime, Utc};

/// Wall clock abstraction for testability.
///
/// Shared with the ticketing subsystem so the store and the validator can be
/// driven from one clock.
pub trait TimeSource: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

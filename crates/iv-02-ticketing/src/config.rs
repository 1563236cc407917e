//! Ticketing configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Smallest accepted `max_token_len`. A version-1 token for short names is
/// already around 400 characters.
pub const MIN_TOKEN_LEN: usize = 256;

/// Issuance and validation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketingConfig {
    /// Seconds after the event start during which a ticket still admits.
    pub grace_window_secs: i64,

    /// Upper bound on encoded token length, so tokens fit a QR code.
    pub max_token_len: usize,
}

impl Default for TicketingConfig {
    fn default() -> Self {
        Self {
            grace_window_secs: 86_400,
            max_token_len: 2048,
        }
    }
}

impl TicketingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grace_window_secs <= 0 {
            return Err(ConfigError::NonPositiveGraceWindow(self.grace_window_secs));
        }
        if self.grace_window().is_none() {
            return Err(ConfigError::GraceWindowOutOfRange(self.grace_window_secs));
        }
        if self.max_token_len < MIN_TOKEN_LEN {
            return Err(ConfigError::TokenLimitTooSmall {
                min: MIN_TOKEN_LEN,
                actual: self.max_token_len,
            });
        }
        Ok(())
    }

    /// `None` when the seconds do not fit a `Duration`.
    pub fn grace_window(&self) -> Option<Duration> {
        Duration::try_seconds(self.grace_window_secs)
    }
}

//! # Runtime Configuration
//!
//! ## Security Requirements
//!
//! - `IV_TICKET_SECRET` MUST be set; there is no default key
//! - The secret is hex and at least 32 bytes

use iv_02_ticketing::TicketingConfig;
use shared_crypto::{CryptoError, SigningKey};
use thiserror::Error;

pub const SECRET_VAR: &str = "IV_TICKET_SECRET";
pub const GRACE_WINDOW_VAR: &str = "IV_GRACE_WINDOW_SECS";
pub const MAX_TOKEN_LEN_VAR: &str = "IV_MAX_TOKEN_LEN";

/// Configuration errors. All are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IV_TICKET_SECRET is not set. Provide a hex-encoded secret of at least 32 bytes.")]
    MissingSecret,

    #[error("IV_TICKET_SECRET is invalid: {0}")]
    InvalidSecret(#[from] CryptoError),

    #[error("{var} must be an integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error(transparent)]
    Ticketing(#[from] iv_02_ticketing::ConfigError),
}

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Ticket signing key.
    pub secret: SigningKey,
    /// Issuance and validation settings.
    pub ticketing: TicketingConfig,
}

impl RuntimeConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_hex = lookup(SECRET_VAR)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingSecret)?;
        let secret = SigningKey::from_hex(&secret_hex)?;

        let mut ticketing = TicketingConfig::default();
        if let Some(value) = lookup(GRACE_WINDOW_VAR) {
            ticketing.grace_window_secs = parse_number(GRACE_WINDOW_VAR, &value)?;
        }
        if let Some(value) = lookup(MAX_TOKEN_LEN_VAR) {
            ticketing.max_token_len = parse_number(MAX_TOKEN_LEN_VAR, &value)?;
        }
        ticketing.validate()?;

        Ok(Self { secret, ticketing })
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: value.to_string(),
    })
}

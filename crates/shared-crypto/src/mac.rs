//! # Keyed Ticket Signing
//!
//! HMAC-SHA256 authentication tags over arbitrary bytes with a process-wide
//! secret.
//!
//! ## Security Invariants
//!
//! - Keys shorter than `MIN_KEY_LEN` are rejected at construction.
//! - `verify` compares tags with `subtle::ConstantTimeEq`, so timing does not
//!   reveal how many leading bytes of a forged tag were correct.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::CryptoError;

type HmacSha256 = Hmac<Sha256>;

/// Minimum accepted secret length in bytes.
pub const MIN_KEY_LEN: usize = 32;

/// Length of an HMAC-SHA256 tag in bytes.
pub const TAG_LEN: usize = 32;

/// Secret key material for ticket signing. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Create from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() < MIN_KEY_LEN {
            return Err(CryptoError::InvalidKeyLength {
                min: MIN_KEY_LEN,
                actual: bytes.len(),
            });
        }
        Ok(Self(bytes.to_vec()))
    }

    /// Create from a hex string (as found in environment configuration).
    pub fn from_hex(encoded: &str) -> Result<Self, CryptoError> {
        let mut bytes = hex::decode(encoded.trim())
            .map_err(|e| CryptoError::InvalidKeyEncoding(e.to_string()))?;
        let key = Self::from_bytes(&bytes);
        bytes.zeroize();
        key
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKey([REDACTED; {}])", self.0.len())
    }
}

/// A 256-bit authentication tag.
///
/// Deliberately not `PartialEq`: compare with [`SignatureTag::ct_eq`].
#[derive(Clone, Copy)]
pub struct SignatureTag([u8; TAG_LEN]);

impl SignatureTag {
    /// Wrap raw tag bytes.
    pub fn from_bytes(bytes: [u8; TAG_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a lowercase or uppercase hex tag.
    pub fn from_hex(encoded: &str) -> Result<Self, CryptoError> {
        let bytes =
            hex::decode(encoded).map_err(|e| CryptoError::InvalidSignatureFormat(e.to_string()))?;
        let array: [u8; TAG_LEN] = bytes.try_into().map_err(|b: Vec<u8>| {
            CryptoError::InvalidSignatureFormat(format!(
                "expected {} bytes, got {}",
                TAG_LEN,
                b.len()
            ))
        })?;
        Ok(Self(array))
    }

    /// Lowercase hex rendering used on the wire.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Get inner bytes.
    pub fn as_bytes(&self) -> &[u8; TAG_LEN] {
        &self.0
    }

    /// Constant-time equality.
    pub fn ct_eq(&self, other: &SignatureTag) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl fmt::Debug for SignatureTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SignatureTag({})", self.to_hex())
    }
}

/// Deterministic keyed signing over bytes.
///
/// Both operations are total. Implementations must be stateless apart from
/// their key so they can be shared across scanner tasks.
pub trait TicketSigner: Send + Sync {
    /// Compute the tag for `message`.
    fn sign(&self, message: &[u8]) -> SignatureTag;

    /// Recompute the tag for `message` and compare in constant time.
    fn verify(&self, message: &[u8], tag: &SignatureTag) -> bool {
        self.sign(message).ct_eq(tag)
    }
}

/// HMAC-SHA256 signer.
///
/// The keyed MAC state is prepared once; each call clones it.
#[derive(Clone)]
pub struct HmacTicketSigner {
    mac: HmacSha256,
}

impl HmacTicketSigner {
    /// Prepare a signer for `key`.
    pub fn new(key: &SigningKey) -> Result<Self, CryptoError> {
        let mac = HmacSha256::new_from_slice(key.as_bytes()).map_err(|_| {
            CryptoError::InvalidKeyLength {
                min: MIN_KEY_LEN,
                actual: key.as_bytes().len(),
            }
        })?;
        Ok(Self { mac })
    }
}

impl fmt::Debug for HmacTicketSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HmacTicketSigner { .. }")
    }
}

impl TicketSigner for HmacTicketSigner {
    fn sign(&self, message: &[u8]) -> SignatureTag {
        let mut mac = self.mac.clone();
        mac.update(message);
        let bytes = mac.finalize().into_bytes();
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(&bytes);
        SignatureTag(tag)
    }
}

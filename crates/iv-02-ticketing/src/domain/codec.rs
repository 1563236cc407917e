//! # Token Codec
//!
//! Converts a [`TicketPayload`] to and from the transport string carried in
//! the guest's QR code.
//!
//! ## Decode order
//!
//! 1. Length, base64 and JSON object shape (`Malformed`)
//! 2. `version` check (`UnsupportedVersion`)
//! 3. Signature over the received field values (`BadSignature`)
//! 4. Typed payload parse (`Malformed`)
//!
//! The signed message is rebuilt from the JSON values exactly as received,
//! so two spellings of the same timestamp do not share a signature.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{Map, Value};
use shared_crypto::{SignatureTag, TicketSigner, TAG_LEN};

use crate::domain::payload::{TicketPayload, VerifiedTicket, TICKET_VERSION};
use crate::error::{DecodeError, EncodeError};

/// Signed fields, in signing order.
const SIGNED_FIELDS: [&str; 8] = [
    "version",
    "rsvpId",
    "eventId",
    "guestId",
    "guestName",
    "eventName",
    "eventStartAt",
    "issuedAt",
];

const SIGNATURE_FIELD: &str = "signature";

/// Stateless encoder/decoder bound to one signing key.
#[derive(Clone)]
pub struct TokenCodec {
    signer: Arc<dyn TicketSigner>,
    max_token_len: usize,
}

impl TokenCodec {
    pub fn new(signer: Arc<dyn TicketSigner>, max_token_len: usize) -> Self {
        Self {
            signer,
            max_token_len,
        }
    }

    pub fn max_token_len(&self) -> usize {
        self.max_token_len
    }

    /// Sign and serialize a payload.
    pub fn encode(&self, payload: &TicketPayload) -> Result<String, EncodeError> {
        let mut fields = match serde_json::to_value(payload) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => {
                return Err(EncodeError::Serialization(
                    "payload is not a JSON object".to_string(),
                ))
            }
            Err(e) => return Err(EncodeError::Serialization(e.to_string())),
        };

        let message = signing_message(&fields)
            .ok_or_else(|| EncodeError::Serialization("missing signed field".to_string()))?;
        let tag = self.signer.sign(&message);
        fields.insert(SIGNATURE_FIELD.to_string(), Value::String(tag.to_hex()));

        let json = serde_json::to_vec(&Value::Object(fields))
            .map_err(|e| EncodeError::Serialization(e.to_string()))?;
        let token = URL_SAFE_NO_PAD.encode(json);

        if token.len() > self.max_token_len {
            return Err(EncodeError::Oversized {
                len: token.len(),
                max: self.max_token_len,
            });
        }
        Ok(token)
    }

    /// Parse, version-check and verify a scanned string.
    pub fn decode(&self, token: &str) -> Result<VerifiedTicket, DecodeError> {
        if token.is_empty() {
            return Err(DecodeError::Malformed("empty token".to_string()));
        }
        if token.len() > self.max_token_len {
            return Err(DecodeError::Malformed(format!(
                "token length {} exceeds {}",
                token.len(),
                self.max_token_len
            )));
        }

        let json = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|e| DecodeError::Malformed(format!("invalid base64: {e}")))?;
        let fields = match serde_json::from_slice::<Value>(&json) {
            Ok(Value::Object(fields)) => fields,
            Ok(_) => return Err(DecodeError::Malformed("not a JSON object".to_string())),
            Err(e) => return Err(DecodeError::Malformed(format!("invalid JSON: {e}"))),
        };

        let version = fields
            .get("version")
            .and_then(Value::as_u64)
            .ok_or_else(|| DecodeError::Malformed("missing version".to_string()))?;
        if version != TICKET_VERSION {
            return Err(DecodeError::UnsupportedVersion { found: version });
        }

        let tag = fields
            .get(SIGNATURE_FIELD)
            .and_then(Value::as_str)
            .and_then(parse_tag)
            .ok_or(DecodeError::BadSignature)?;
        let message = signing_message(&fields)
            .ok_or_else(|| DecodeError::Malformed("missing signed field".to_string()))?;
        if !self.signer.verify(&message, &tag) {
            return Err(DecodeError::BadSignature);
        }

        let payload: TicketPayload = serde_json::from_value(Value::Object(fields))
            .map_err(|e| DecodeError::Malformed(format!("invalid payload: {e}")))?;
        Ok(VerifiedTicket::new(payload))
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("max_token_len", &self.max_token_len)
            .finish_non_exhaustive()
    }
}

/// JSON rendering of each signed field joined with `'\n'`.
///
/// `None` if a field is absent. JSON escaping keeps `'\n'` out of every part.
fn signing_message(fields: &Map<String, Value>) -> Option<Vec<u8>> {
    let mut parts = Vec::with_capacity(SIGNED_FIELDS.len());
    for name in SIGNED_FIELDS {
        parts.push(fields.get(name)?.to_string());
    }
    Some(parts.join("\n").into_bytes())
}

/// Accept only the canonical lowercase hex rendering.
fn parse_tag(hex: &str) -> Option<SignatureTag> {
    let canonical = hex.len() == TAG_LEN * 2
        && hex
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
    if !canonical {
        return None;
    }
    SignatureTag::from_hex(hex).ok()
}

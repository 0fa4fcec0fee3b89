//! Qualified encoding: derivation code prefix + base64url digest.
//!
//! The raw digest is left-padded with `pad_size` zero bytes, encoded as
//! base64url without padding, and the first `pad_size` characters (which only
//! carry the zero bits) are replaced by the code prefix.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::codes::DerivationCode;
use crate::errors::SaidError;
use crate::said::Said;
use crate::validation::ValidationError;

/// Encodes `raw` as a qualified identifier for `code`.
///
/// # Errors
///
/// Returns [`SaidError::EncodingLengthMismatch`] if `raw` is not exactly
/// `code.raw_size()` bytes, or if the encoded result does not come out at
/// `code.full_size()` characters.
pub fn encode(code: DerivationCode, raw: &[u8]) -> Result<Said, SaidError> {
    if raw.len() != code.raw_size() {
        return Err(SaidError::EncodingLengthMismatch {
            code: code.prefix().to_string(),
            expected: code.raw_size(),
            actual: raw.len(),
        });
    }

    let pad = code.pad_size();
    let mut padded = vec![0u8; pad];
    padded.extend_from_slice(raw);
    let b64 = URL_SAFE_NO_PAD.encode(&padded);

    let mut qualified = String::with_capacity(code.full_size());
    qualified.push_str(code.prefix());
    qualified.push_str(&b64[pad..]);

    if qualified.len() != code.full_size() {
        return Err(SaidError::EncodingLengthMismatch {
            code: code.prefix().to_string(),
            expected: code.full_size(),
            actual: qualified.len(),
        });
    }
    Ok(Said::new(qualified))
}

/// Splits a qualified identifier back into its code and raw digest.
///
/// # Errors
///
/// - [`SaidError::Validation`] if the prefix is unknown or the body is not base64url
/// - [`SaidError::EncodingLengthMismatch`] if the length disagrees with the code
pub fn decode(said: &str) -> Result<(DerivationCode, Vec<u8>), SaidError> {
    let code = DerivationCode::from_said(said)
        .ok_or_else(|| ValidationError::UnknownCode(said.chars().take(2).collect()))?;
    if said.len() != code.full_size() {
        return Err(SaidError::EncodingLengthMismatch {
            code: code.prefix().to_string(),
            expected: code.full_size(),
            actual: said.len(),
        });
    }

    let pad = code.pad_size();
    let body = format!("{}{}", "A".repeat(pad), &said[code.prefix().len()..]);
    let decoded = URL_SAFE_NO_PAD
        .decode(body.as_bytes())
        .map_err(|_| ValidationError::PatternMismatch {
            field: "said",
            value: said.to_string(),
        })?;
    Ok((code, decoded[pad..].to_vec()))
}

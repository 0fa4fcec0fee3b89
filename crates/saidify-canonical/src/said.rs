//! SAID computation.
//!
//! `SAID = prefix || b64url(pad || H(canonical(document with field = "#" * full_size)))`
//!
//! The placeholder has exactly the length of the final identifier, so
//! swapping one for the other never changes the canonical byte length, and
//! the identifier's previous value never reaches the hash input.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::canonicalizer::Canonicalizer;
use crate::codes::DerivationCode;
use crate::digest::digest;
use crate::encoder::{decode, encode};
use crate::errors::SaidError;
use crate::validation::ValidationError;

/// Default identifier field name.
pub const DEFAULT_FIELD: &str = "$id";

/// Self-addressing identifier: derivation code prefix followed by base64url.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Said(String);

impl Said {
    /// Creates a new instance without validation; callers are responsible for conformity.
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Parses a SAID, checking the alphabet, the prefix and the length.
    pub fn parse(value: impl Into<String>) -> Result<Self, SaidError> {
        let s = value.into();
        if !Regex::new(r"^[A-Za-z0-9_-]+$")
            .expect("invalid regex")
            .is_match(&s)
        {
            return Err(ValidationError::PatternMismatch {
                field: "said",
                value: s,
            }
            .into());
        }
        decode(&s)?;
        Ok(Self(s))
    }

    /// Derivation code named by the prefix.
    pub fn code(&self) -> Option<DerivationCode> {
        DerivationCode::from_said(&self.0)
    }

    /// Consumes the SAID, returning the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Said {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Said {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl PartialEq<str> for Said {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// Computes SAIDs for one identifier field under one derivation code.
///
/// A `Saider` holds no mutable state and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use saidify_canonical::{DerivationCode, Saider};
/// use serde_json::json;
///
/// let saider = Saider::new("$id", DerivationCode::Blake3_256)?;
/// let mut schema = json!({"title": "Foo"});
///
/// let said = saider.saidify(&mut schema)?;
/// assert_eq!(said.as_ref().len(), 44);
/// assert!(saider.verify(&schema)?);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Saider {
    canonicalizer: Canonicalizer,
    code: DerivationCode,
}

impl Saider {
    /// Creates a SAID computer, checking up front that `code` is usable.
    ///
    /// # Errors
    ///
    /// Returns [`SaidError::UnsupportedAlgorithm`] or
    /// [`SaidError::EncodingLengthMismatch`] for a code this build cannot serve.
    pub fn new(field: impl Into<String>, code: DerivationCode) -> Result<Self, SaidError> {
        code.ensure_supported()?;
        Ok(Self {
            canonicalizer: Canonicalizer::new(field),
            code,
        })
    }

    /// Identifier field name.
    pub fn field(&self) -> &str {
        self.canonicalizer.field()
    }

    /// Derivation code.
    pub fn code(&self) -> DerivationCode {
        self.code
    }

    /// Canonical bytes that are hashed for `document`.
    pub fn canonical_bytes(&self, document: &Value) -> Result<Vec<u8>, SaidError> {
        Ok(self
            .canonicalizer
            .canonicalize_masked(document, self.code.full_size())?)
    }

    /// Computes the SAID of `document`. The document is not modified.
    ///
    /// # Errors
    ///
    /// - [`SaidError::InvalidFieldType`] if the identifier field is not a string
    /// - [`SaidError::Canonicalization`] if the document is not an object
    /// - [`SaidError::UnsupportedAlgorithm`] / [`SaidError::EncodingLengthMismatch`]
    ///   from the digest and encoding stages
    pub fn compute(&self, document: &Value) -> Result<Said, SaidError> {
        let bytes = self.canonical_bytes(document)?;
        let raw = digest(self.code.alg(), &bytes, self.code.raw_size())?;
        encode(self.code, &raw)
    }

    /// Returns the identifier currently stored in `document`, if any.
    pub fn stored<'a>(&self, document: &'a Value) -> Result<Option<&'a str>, SaidError> {
        match document.get(self.field()) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(SaidError::InvalidFieldType {
                field: self.field().to_string(),
                found: crate::canonicalizer::json_type(other),
            }),
        }
    }

    /// Checks whether the stored identifier equals the computed one.
    pub fn verify(&self, document: &Value) -> Result<bool, SaidError> {
        let computed = self.compute(document)?;
        Ok(self.stored(document)? == Some(computed.as_ref()))
    }

    /// Computes the SAID and writes it into the identifier field.
    pub fn saidify(&self, document: &mut Value) -> Result<Said, SaidError> {
        let said = self.compute(document)?;
        if let Value::Object(map) = document {
            map.insert(self.field().to_string(), Value::String(said.to_string()));
        }
        Ok(said)
    }
}

/// Computes the SAID of `document` for `field` under `code`.
pub fn compute_said(
    document: &Value,
    field: &str,
    code: DerivationCode,
) -> Result<Said, SaidError> {
    Saider::new(field, code)?.compute(document)
}

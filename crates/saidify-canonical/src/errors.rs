use thiserror::Error;

use crate::canonicalizer::CanonicalizationError;
use crate::digest::DigestAlg;
use crate::validation::ValidationError;

/// Errors raised while computing, encoding or decoding a SAID.
#[derive(Error, Debug)]
pub enum SaidError {
    /// The derivation code names a digest algorithm that is not compiled in.
    #[error("unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(DigestAlg),
    /// Raw digest or encoded identifier length disagrees with the derivation code.
    #[error("encoding length mismatch for '{code}': expected {expected}, got {actual}")]
    EncodingLengthMismatch {
        /// Derivation code prefix or algorithm name.
        code: String,
        /// Length the code declares.
        expected: usize,
        /// Length that was produced or supplied.
        actual: usize,
    },
    /// The identifier field holds something other than a string.
    #[error("identifier field '{field}' must be a string, found {found}")]
    InvalidFieldType {
        /// Identifier field name.
        field: String,
        /// JSON type that was found instead.
        found: &'static str,
    },
    /// Canonicalization failed.
    #[error("canonicalization failed: {0}")]
    Canonicalization(CanonicalizationError),
    /// A SAID string could not be parsed.
    #[error("invalid SAID: {0}")]
    Validation(#[from] ValidationError),
}

impl SaidError {
    /// Returns `true` when the error reflects a misconfigured derivation code
    /// rather than bad input data. Such errors cannot be skipped per document.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SaidError::UnsupportedAlgorithm(_) | SaidError::EncodingLengthMismatch { .. }
        )
    }
}

impl From<CanonicalizationError> for SaidError {
    fn from(err: CanonicalizationError) -> Self {
        match err {
            CanonicalizationError::InvalidFieldType { field, found } => {
                SaidError::InvalidFieldType { field, found }
            }
            other => SaidError::Canonicalization(other),
        }
    }
}

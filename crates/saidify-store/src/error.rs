//! Error types for store operations.

use saidify_canonical::SaidError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, rewriting or persisting a document.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The document location does not exist.
    #[error("document not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error while reading a document.
    #[error("I/O error reading {}: {source}", path.display())]
    Io {
        /// Document location.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Document content is not well-formed JSON.
    #[error("parse error in {}: {source}", path.display())]
    Parse {
        /// Document location.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// Persisting the rewritten document failed; the prior content remains.
    #[error("failed to write {}: {reason}", path.display())]
    WriteFailure {
        /// Document location.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },
    /// SAID computation failed.
    #[error(transparent)]
    Said(#[from] SaidError),
}

/// Error taxonomy reported per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Location does not exist.
    NotFound,
    /// Content is not well-formed, or not a JSON object.
    ParseError,
    /// Identifier field is not a string.
    InvalidFieldType,
    /// Digest algorithm not available.
    UnsupportedAlgorithm,
    /// Digest or encoding length disagrees with the derivation code.
    EncodingLengthMismatch,
    /// Reading storage failed for a reason other than absence.
    StorageReadFailure,
    /// Persisting failed.
    StorageWriteFailure,
}

impl StoreError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::NotFound(_) => ErrorKind::NotFound,
            StoreError::Io { .. } => ErrorKind::StorageReadFailure,
            StoreError::Parse { .. } => ErrorKind::ParseError,
            StoreError::WriteFailure { .. } => ErrorKind::StorageWriteFailure,
            StoreError::Said(err) => match err {
                SaidError::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
                SaidError::EncodingLengthMismatch { .. } => ErrorKind::EncodingLengthMismatch,
                SaidError::InvalidFieldType { .. } => ErrorKind::InvalidFieldType,
                SaidError::Canonicalization(_) | SaidError::Validation(_) => {
                    ErrorKind::ParseError
                }
            },
        }
    }

    /// Whether the error must abort the whole run instead of one document.
    pub fn is_fatal(&self) -> bool {
        matches!(self, StoreError::Said(err) if err.is_fatal())
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::NotFound => "NotFound",
            ErrorKind::ParseError => "ParseError",
            ErrorKind::InvalidFieldType => "InvalidFieldType",
            ErrorKind::UnsupportedAlgorithm => "UnsupportedAlgorithm",
            ErrorKind::EncodingLengthMismatch => "EncodingLengthMismatch",
            ErrorKind::StorageReadFailure => "StorageReadFailure",
            ErrorKind::StorageWriteFailure => "StorageWriteFailure",
        };
        f.write_str(name)
    }
}

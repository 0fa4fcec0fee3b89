//! Canonical primitives for self-addressing identifiers (SAIDs).
//!
//! A SAID is a digest of a document's own content, qualified with a
//! derivation code and embedded back into the document at a reserved field.
//! This crate holds every step that participates in computing one:
//!
//! - [`Canonicalizer`]: masks the identifier field with a fixed-length
//!   placeholder and emits deterministic canonical JSON (sorted keys, compact,
//!   as written by the `canonical_json` crate)
//! - [`digest`](digest::digest): hashes canonical bytes under a [`DigestAlg`]
//! - [`encode`](encoder::encode): turns a [`DerivationCode`] plus raw digest
//!   into a fixed-length, self-describing [`Said`]
//! - [`Saider`]: composes the three into `document -> SAID`
//!
//! Nothing here performs I/O; every function is pure and deterministic.
//!
#![deny(missing_docs)]

/// Canonicalization of documents with the identifier field masked.
pub mod canonicalizer;
/// Derivation code table.
pub mod codes;
/// Digest engine.
pub mod digest;
/// Qualified (prefix + base64url) encoding of raw digests.
pub mod encoder;
/// Error types for SAID computation.
pub mod errors;
/// SAID newtype and the SAID computer.
pub mod said;
/// Validation helpers used by canonical types.
pub mod validation;

pub use canonicalizer::{CanonicalizationError, Canonicalizer, PLACEHOLDER_CHAR};
pub use codes::DerivationCode;
pub use digest::DigestAlg;
pub use encoder::{decode, encode};
pub use errors::SaidError;
pub use said::{compute_said, Said, Saider, DEFAULT_FIELD};
pub use validation::ValidationError;

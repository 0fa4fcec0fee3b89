//! Storage and rewrite orchestration for self-addressing identifiers.
//!
//! This crate provides:
//! - `DocumentStore` trait with filesystem and in-memory implementations
//! - Atomic, formatting-stable persistence of rewritten documents
//! - The rewrite orchestrator: load, compute, compare, persist only on change
//! - A batch runner with per-document failure isolation
//!
//! Core invariants:
//! - A document whose stored SAID is already correct is never written
//! - A failed write leaves the previous content intact
//! - One document's failure never stops the rest of a batch

#![deny(missing_docs)]

/// Batch processing across many documents.
pub mod batch;
/// Document storage backends.
pub mod document;
/// Error types for store operations.
pub mod error;
/// Rewrite orchestration for a single document.
pub mod rewrite;

pub use batch::{BatchEntry, BatchReport, BatchRunner};
pub use document::{render_document, DocumentStore, FsStore, MemoryStore};
pub use error::{ErrorKind, StoreError};
pub use rewrite::{RewriteMode, RewriteOutcome, Rewriter};

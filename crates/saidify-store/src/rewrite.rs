//! Rewrite orchestration.
//!
//! One call walks a single document through
//! `Load -> ExtractOld -> Compute -> Compare -> (NoChange | Rewrite) -> Report`
//! and keeps no state between documents.

use saidify_canonical::{Said, Saider};
use serde::Serialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::document::DocumentStore;
use crate::error::StoreError;

/// Whether a changed SAID is written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RewriteMode {
    /// Persist the new SAID when it differs from the stored one.
    #[default]
    Write,
    /// Never write; `changed` reports what a write run would do.
    Check,
}

/// Result of processing one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteOutcome {
    /// Document location.
    pub location: PathBuf,
    /// Identifier stored before processing, if any.
    pub previous: Option<String>,
    /// Identifier computed from the current content.
    pub said: Said,
    /// Whether `said` differs from `previous`.
    pub changed: bool,
}

/// Applies a [`Saider`] to documents held by a [`DocumentStore`].
pub struct Rewriter<S> {
    store: S,
    saider: Saider,
    mode: RewriteMode,
}

impl<S: DocumentStore> Rewriter<S> {
    /// Creates a rewriter that writes changed documents back.
    pub fn new(store: S, saider: Saider) -> Self {
        Self {
            store,
            saider,
            mode: RewriteMode::Write,
        }
    }

    /// Sets the rewrite mode.
    pub fn with_mode(mut self, mode: RewriteMode) -> Self {
        self.mode = mode;
        self
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The SAID computer in use.
    pub fn saider(&self) -> &Saider {
        &self.saider
    }

    /// Processes the document at `location`.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] / [`StoreError::Parse`] while loading
    /// - [`StoreError::Said`] from computation, including a non-string
    ///   identifier field or a document that is not an object
    /// - [`StoreError::WriteFailure`] if persisting fails; the stored content
    ///   is left as it was
    pub fn rewrite(&self, location: &Path) -> Result<RewriteOutcome, StoreError> {
        let mut document = self.store.load(location)?;

        let previous = self.saider.stored(&document)?.map(str::to_owned);
        let said = self.saider.compute(&document)?;

        if previous.as_deref() == Some(said.as_ref()) {
            debug!(location = %location.display(), said = %said, "SAID unchanged");
            return Ok(RewriteOutcome {
                location: location.to_path_buf(),
                previous,
                said,
                changed: false,
            });
        }

        if self.mode == RewriteMode::Write {
            set_field(&mut document, self.saider.field(), &said);
            self.store.persist(location, &document)?;
            info!(
                location = %location.display(),
                previous = previous.as_deref().unwrap_or("(none)"),
                said = %said,
                "SAID updated"
            );
        } else {
            debug!(location = %location.display(), said = %said, "SAID stale");
        }

        Ok(RewriteOutcome {
            location: location.to_path_buf(),
            previous,
            said,
            changed: true,
        })
    }
}

fn set_field(document: &mut Value, field: &str, said: &Said) {
    // compute() has already rejected non-object documents
    if let Value::Object(map) = document {
        map.insert(field.to_string(), Value::String(said.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryStore;
    use crate::error::ErrorKind;
    use saidify_canonical::{DerivationCode, DEFAULT_FIELD};

    fn rewriter(store: MemoryStore) -> Rewriter<MemoryStore> {
        let saider = Saider::new(DEFAULT_FIELD, DerivationCode::Blake3_256).unwrap();
        Rewriter::new(store, saider)
    }

    #[test]
    fn first_run_writes_second_run_is_a_no_op() {
        let store = MemoryStore::new();
        store.insert("s.json", r#"{"title": "Foo"}"#);
        let rewriter = rewriter(store);
        let path = Path::new("s.json");

        let first = rewriter.rewrite(path).unwrap();
        assert!(first.changed);
        assert_eq!(first.previous, None);
        assert_eq!(rewriter.store().writes(), 1);
        let written = rewriter.store().get(path).unwrap();

        let second = rewriter.rewrite(path).unwrap();
        assert!(!second.changed);
        assert_eq!(second.previous.as_deref(), Some(first.said.as_ref()));
        assert_eq!(second.said, first.said);
        assert_eq!(rewriter.store().writes(), 1);
        assert_eq!(rewriter.store().get(path).unwrap(), written);
    }

    #[test]
    fn stale_identifier_is_replaced() {
        let store = MemoryStore::new();
        store.insert("s.json", r#"{"$id": "Eold", "title": "Foo"}"#);
        let rewriter = rewriter(store);

        let outcome = rewriter.rewrite(Path::new("s.json")).unwrap();
        assert!(outcome.changed);
        assert_eq!(outcome.previous.as_deref(), Some("Eold"));
        let text = rewriter.store().get(Path::new("s.json")).unwrap();
        assert!(text.contains(outcome.said.as_ref()));
        assert!(text.ends_with("}\n"));
    }

    #[test]
    fn check_mode_never_writes() {
        let store = MemoryStore::new();
        store.insert("s.json", r#"{"title": "Foo"}"#);
        let rewriter = rewriter(store).with_mode(RewriteMode::Check);

        let outcome = rewriter.rewrite(Path::new("s.json")).unwrap();
        assert!(outcome.changed);
        assert_eq!(rewriter.store().writes(), 0);
        assert_eq!(
            rewriter.store().get(Path::new("s.json")).unwrap(),
            r#"{"title": "Foo"}"#
        );
    }

    #[test]
    fn error_kinds_per_state() {
        let store = MemoryStore::new();
        store.insert("bad.json", "{ not json");
        store.insert("num.json", r#"{"$id": 12}"#);
        store.insert("arr.json", "[1, 2]");
        let rewriter = rewriter(store);

        let kind = |p: &str| rewriter.rewrite(Path::new(p)).unwrap_err().kind();
        assert_eq!(kind("missing.json"), ErrorKind::NotFound);
        assert_eq!(kind("bad.json"), ErrorKind::ParseError);
        assert_eq!(kind("num.json"), ErrorKind::InvalidFieldType);
        assert_eq!(kind("arr.json"), ErrorKind::ParseError);
    }

    #[test]
    fn write_failure_keeps_previous_content() {
        let store = MemoryStore::new();
        store.insert("s.json", r#"{"title": "Foo"}"#);
        store.fail_writes(true);
        let rewriter = rewriter(store);

        let err = rewriter.rewrite(Path::new("s.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::StorageWriteFailure);
        assert!(!err.is_fatal());
        assert_eq!(
            rewriter.store().get(Path::new("s.json")).unwrap(),
            r#"{"title": "Foo"}"#
        );
    }
}

//! Batch processing with per-document failure isolation.

use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{error, warn};

use crate::document::DocumentStore;
use crate::error::StoreError;
use crate::rewrite::{RewriteOutcome, Rewriter};

/// Result for one attempted document.
#[derive(Debug)]
pub struct BatchEntry {
    /// Document location.
    pub location: PathBuf,
    /// Outcome, or the error that stopped this document.
    pub result: Result<RewriteOutcome, StoreError>,
}

/// Every attempted document, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// One entry per input location.
    pub entries: Vec<BatchEntry>,
}

impl BatchReport {
    /// Successfully processed documents.
    pub fn successes(&self) -> impl Iterator<Item = &RewriteOutcome> {
        self.entries.iter().filter_map(|e| e.result.as_ref().ok())
    }

    /// Documents that failed, with their errors.
    pub fn failures(&self) -> impl Iterator<Item = (&Path, &StoreError)> {
        self.entries
            .iter()
            .filter_map(|e| e.result.as_ref().err().map(|err| (e.location.as_path(), err)))
    }

    /// Number of documents whose SAID changed (or would change in check mode).
    pub fn changed(&self) -> usize {
        self.successes().filter(|o| o.changed).count()
    }

    /// `true` when no document failed.
    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Number of attempted documents.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing was attempted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Runs a [`Rewriter`] over many documents.
///
/// Per-document errors are recorded and processing continues. Errors that
/// indicate a misconfigured derivation code abort the run.
pub struct BatchRunner<S> {
    rewriter: Rewriter<S>,
}

impl<S: DocumentStore> BatchRunner<S> {
    /// Creates a batch runner.
    pub fn new(rewriter: Rewriter<S>) -> Self {
        Self { rewriter }
    }

    /// The wrapped rewriter.
    pub fn rewriter(&self) -> &Rewriter<S> {
        &self.rewriter
    }

    /// Processes `locations` one after another.
    pub fn run<P: AsRef<Path>>(&self, locations: &[P]) -> Result<BatchReport, StoreError> {
        let mut report = BatchReport::default();
        for location in locations {
            report.entries.push(self.process(location.as_ref())?);
        }
        Ok(report)
    }

    /// Processes `locations` on the rayon pool. Completed documents are
    /// appended to a shared accumulator; the report is returned in input order.
    pub fn run_parallel<P: AsRef<Path> + Sync>(
        &self,
        locations: &[P],
    ) -> Result<BatchReport, StoreError> {
        let completed = Mutex::new(Vec::with_capacity(locations.len()));

        locations
            .par_iter()
            .enumerate()
            .try_for_each(|(idx, location)| {
                let entry = self.process(location.as_ref())?;
                completed
                    .lock()
                    .unwrap_or_else(|poisoned| poisoned.into_inner())
                    .push((idx, entry));
                Ok::<(), StoreError>(())
            })?;

        let mut completed = completed
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        completed.sort_by_key(|(idx, _)| *idx);
        Ok(BatchReport {
            entries: completed.into_iter().map(|(_, entry)| entry).collect(),
        })
    }

    fn process(&self, location: &Path) -> Result<BatchEntry, StoreError> {
        match self.rewriter.rewrite(location) {
            Err(err) if err.is_fatal() => {
                error!(location = %location.display(), error = %err, "aborting batch");
                Err(err)
            }
            result => {
                if let Err(err) = &result {
                    warn!(
                        location = %location.display(),
                        kind = %err.kind(),
                        error = %err,
                        "document failed"
                    );
                }
                Ok(BatchEntry {
                    location: location.to_path_buf(),
                    result,
                })
            }
        }
    }
}

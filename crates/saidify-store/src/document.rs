use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::NamedTempFile;

use crate::error::StoreError;

/// Indentation used when writing documents back.
const INDENT: &[u8] = b"    ";

/// Storage backend for documents.
///
/// Each location holds exactly one document. Implementations must make
/// `persist` atomic: a concurrent reader sees either the old content or the
/// new content, never a mix.
pub trait DocumentStore: Send + Sync {
    /// Loads and parses the document at `location`.
    fn load(&self, location: &Path) -> Result<Value, StoreError>;

    /// Replaces the document at `location`.
    fn persist(&self, location: &Path, document: &Value) -> Result<(), StoreError>;
}

/// Renders a document in the stable on-disk layout: four-space indentation,
/// source key order, trailing newline.
pub fn render_document(document: &Value) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    document.serialize(&mut ser)?;
    buf.push(b'\n');
    // serde_json only emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn parse_document(location: &Path, text: &str) -> Result<Value, StoreError> {
    serde_json::from_str(text).map_err(|source| StoreError::Parse {
        path: location.to_path_buf(),
        source,
    })
}

/// Filesystem-backed store. Writes go through a temporary file in the target
/// directory which takes over the original's permissions, is synced, and is
/// renamed over the original; the directory is synced after the rename.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStore;

impl FsStore {
    /// Creates a filesystem store.
    pub fn new() -> Self {
        Self
    }
}

impl DocumentStore for FsStore {
    fn load(&self, location: &Path) -> Result<Value, StoreError> {
        let text = std::fs::read_to_string(location).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                StoreError::NotFound(location.to_path_buf())
            } else {
                StoreError::Io {
                    path: location.to_path_buf(),
                    source,
                }
            }
        })?;
        parse_document(location, &text)
    }

    fn persist(&self, location: &Path, document: &Value) -> Result<(), StoreError> {
        let write_failure = |reason: String| StoreError::WriteFailure {
            path: location.to_path_buf(),
            reason,
        };

        let rendered = render_document(document).map_err(|e| write_failure(e.to_string()))?;
        let dir = match location.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| write_failure(e.to_string()))?;
        temp.write_all(rendered.as_bytes())
            .map_err(|e| write_failure(e.to_string()))?;
        if let Ok(meta) = std::fs::metadata(location) {
            temp.as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| write_failure(e.to_string()))?;
        }
        temp.as_file()
            .sync_all()
            .map_err(|e| write_failure(e.to_string()))?;
        temp.persist(location)
            .map_err(|e| write_failure(e.error.to_string()))?;
        sync_dir(dir).map_err(|e| write_failure(e.to_string()))?;
        Ok(())
    }
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::File::open(dir)?.sync_all()
}

// Directories cannot be opened as files here; the rename is all we get.
#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

/// In-memory store holding rendered documents by location.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: Mutex<BTreeMap<PathBuf, String>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores raw document text at `location`.
    pub fn insert(&self, location: impl Into<PathBuf>, text: impl Into<String>) {
        self.lock().insert(location.into(), text.into());
    }

    /// Returns the raw text stored at `location`.
    pub fn get(&self, location: &Path) -> Option<String> {
        self.lock().get(location).cloned()
    }

    /// Number of successful `persist` calls.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Makes every subsequent `persist` fail without touching stored content.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<PathBuf, String>> {
        // A poisoned map is still consistent: every mutation is a single insert.
        self.documents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self, location: &Path) -> Result<Value, StoreError> {
        let text = self
            .get(location)
            .ok_or_else(|| StoreError::NotFound(location.to_path_buf()))?;
        parse_document(location, &text)
    }

    fn persist(&self, location: &Path, document: &Value) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::WriteFailure {
                path: location.to_path_buf(),
                reason: "writes disabled".to_string(),
            });
        }
        let rendered = render_document(document).map_err(|e| StoreError::WriteFailure {
            path: location.to_path_buf(),
            reason: e.to_string(),
        })?;
        self.lock().insert(location.to_path_buf(), rendered);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

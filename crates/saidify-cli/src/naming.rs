//! Source-code constant names derived from document file names.

use crate::config::SaidifyConfig;
use std::path::Path;

/// Derives constant names such as `ENDORSEMENT_SCHEMA_SAID` from base names
/// such as `matou-endorsement-schema`.
#[derive(Debug, Clone)]
pub struct ConstantNamer {
    prefix: String,
    marker: String,
    suffix: String,
}

impl ConstantNamer {
    /// Creates a namer.
    pub fn new(
        prefix: impl Into<String>,
        marker: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            marker: marker.into(),
            suffix: suffix.into(),
        }
    }

    /// Creates a namer from the configured prefix, marker and suffix.
    pub fn from_config(config: &SaidifyConfig) -> Self {
        Self::new(&config.prefix, &config.schema_marker, &config.suffix)
    }

    /// Strips the prefix, turns separators into underscores and uppercases.
    /// The suffix goes right after the marker when present, else at the end.
    pub fn constant_name(&self, base_name: &str) -> String {
        let stripped = base_name.strip_prefix(&self.prefix).unwrap_or(base_name);
        let name = stripped.replace(['-', '.', ' '], "_").to_uppercase();
        if !self.marker.is_empty() && name.contains(&self.marker) {
            name.replace(&self.marker, &format!("{}{}", self.marker, self.suffix))
        } else {
            name + &self.suffix
        }
    }

    /// Constant name for a document path, using its file stem.
    pub fn for_path(&self, path: &Path) -> String {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        self.constant_name(&stem)
    }
}

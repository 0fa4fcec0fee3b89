//! Configuration loading.
//!
//! Sources, lowest precedence first: built-in defaults, `saidify.toml` (or
//! the file passed with `--config`), `SAIDIFY_*` environment variables, and
//! finally command-line flags applied by `main`.

use saidify_canonical::{DerivationCode, DEFAULT_FIELD};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime configuration for the `saidify` binary.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SaidifyConfig {
    /// Identifier field name.
    #[serde(default = "default_field")]
    pub field: String,

    /// Derivation code prefix (`E`, `I`, `0D`, ...).
    #[serde(default)]
    pub code: DerivationCode,

    /// Directory scanned by `--all`.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// File name prefix selected by `--all` and stripped from constant names.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// File extension selected by `--all`.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Marker after which the constant suffix is inserted.
    #[serde(default = "default_schema_marker")]
    pub schema_marker: String,

    /// Suffix appended to constant names.
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

impl Default for SaidifyConfig {
    fn default() -> Self {
        Self {
            field: default_field(),
            code: DerivationCode::default(),
            dir: default_dir(),
            prefix: default_prefix(),
            extension: default_extension(),
            schema_marker: default_schema_marker(),
            suffix: default_suffix(),
        }
    }
}

impl SaidifyConfig {
    /// Loads configuration from `path` (or `./saidify.toml` if present) and
    /// the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ::config::ConfigError> {
        let file = match path {
            Some(path) => ::config::File::from(path).required(true),
            None => ::config::File::with_name("saidify").required(false),
        };
        ::config::Config::builder()
            .add_source(file)
            .add_source(::config::Environment::with_prefix("SAIDIFY"))
            .build()?
            .try_deserialize()
    }
}

fn default_field() -> String {
    DEFAULT_FIELD.to_string()
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_prefix() -> String {
    "matou-".to_string()
}

fn default_extension() -> String {
    "json".to_string()
}

fn default_schema_marker() -> String {
    "_SCHEMA".to_string()
}

fn default_suffix() -> String {
    "_SAID".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_schema_layout() {
        let config = SaidifyConfig::default();
        assert_eq!(config.field, "$id");
        assert_eq!(config.code, DerivationCode::Blake3_256);
        assert_eq!(config.prefix, "matou-");
        assert_eq!(config.schema_marker, "_SCHEMA");
        assert_eq!(config.suffix, "_SAID");
    }

    #[test]
    fn file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        std::fs::write(&path, "code = \"I\"\nprefix = \"acme-\"\nfield = \"d\"\n").unwrap();

        let config = SaidifyConfig::load(Some(&path)).unwrap();
        assert_eq!(config.code, DerivationCode::Sha2_256);
        assert_eq!(config.prefix, "acme-");
        assert_eq!(config.field, "d");
        assert_eq!(config.suffix, "_SAID");
    }

    #[test]
    fn unknown_code_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        std::fs::write(&path, "code = \"ZZ\"\n").unwrap();
        assert!(SaidifyConfig::load(Some(&path)).is_err());
    }
}

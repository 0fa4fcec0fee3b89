pub mod canonicalize;
pub mod compute;
pub mod rewrite;
pub mod verify;

use std::io::{self, Read};
use std::path::PathBuf;

use crate::config::SaidifyConfig;
use crate::select;

/// Reads a document from a file, or stdin when no path is given.
pub fn read_input(
    input: Option<PathBuf>,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let json_str = if let Some(path) = input {
        std::fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read file {}: {}", path.display(), e))?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };

    Ok(serde_json::from_str(&json_str).map_err(|e| format!("Invalid JSON: {}", e))?)
}

/// Resolves the documents to process: the explicit list, or every matching
/// file in the configured directory when `all` is set.
pub fn resolve_documents(
    files: Vec<PathBuf>,
    all: bool,
    config: &SaidifyConfig,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    if all {
        let found = select::matching_documents(&config.dir, &config.prefix, &config.extension)
            .map_err(|e| format!("Failed to scan {}: {}", config.dir.display(), e))?;
        if found.is_empty() {
            return Err(format!(
                "No {}*.{} files in {}",
                config.prefix,
                config.extension,
                config.dir.display()
            )
            .into());
        }
        Ok(found)
    } else if files.is_empty() {
        Err("No documents given; pass FILES or --all".into())
    } else {
        Ok(files)
    }
}

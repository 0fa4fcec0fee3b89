//! Canonicalize command implementation.

use saidify_canonical::Saider;
use std::path::PathBuf;

use super::read_input;

/// Prints the canonical bytes that are hashed for the input document.
pub fn run(saider: &Saider, input: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let document = read_input(input)?;
    let bytes = saider
        .canonical_bytes(&document)
        .map_err(|e| format!("Canonicalization failed: {}", e))?;
    println!("{}", String::from_utf8_lossy(&bytes));
    Ok(())
}

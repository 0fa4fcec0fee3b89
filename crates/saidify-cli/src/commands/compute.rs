//! Compute command implementation.

use saidify_canonical::Saider;
use std::path::PathBuf;

use super::read_input;

/// Prints the SAID of the input document without modifying it.
pub fn run(saider: &Saider, input: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let document = read_input(input)?;
    let said = saider
        .compute(&document)
        .map_err(|e| format!("SAID computation failed: {}", e))?;
    println!("{}", said);
    Ok(())
}

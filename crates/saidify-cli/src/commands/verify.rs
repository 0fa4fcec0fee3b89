//! Verify command implementation.

use saidify_canonical::Saider;
use saidify_store::{BatchRunner, FsStore, RewriteMode, Rewriter};
use std::path::PathBuf;

use super::resolve_documents;
use crate::config::SaidifyConfig;
use crate::naming::ConstantNamer;
use crate::output;

/// Checks stored SAIDs without writing anything.
///
/// Returns `Ok(true)` only when every document loaded and carries its
/// correct SAID.
pub fn run(
    saider: Saider,
    config: &SaidifyConfig,
    files: Vec<PathBuf>,
    all: bool,
    json: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let documents = resolve_documents(files, all, config)?;
    let rewriter = Rewriter::new(FsStore::new(), saider).with_mode(RewriteMode::Check);
    let report = BatchRunner::new(rewriter).run(&documents)?;

    if json {
        let namer = ConstantNamer::from_config(config);
        println!(
            "{}",
            serde_json::to_string_pretty(&output::report_json(&report, &namer))?
        );
    } else {
        output::print_table_header();
        for entry in &report.entries {
            println!("{}", output::format_table_row(entry));
        }
    }

    Ok(report.is_complete() && report.changed() == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use saidify_canonical::{DerivationCode, DEFAULT_FIELD};
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_verify_detects_stale_and_accepts_fresh() {
        let temp = TempDir::new().unwrap();
        let saider = Saider::new(DEFAULT_FIELD, DerivationCode::Blake3_256).unwrap();

        let mut fresh = json!({"title": "Fresh"});
        saider.saidify(&mut fresh).unwrap();
        let fresh_path = temp.path().join("fresh.json");
        fs::write(&fresh_path, fresh.to_string()).unwrap();

        let stale_path = temp.path().join("stale.json");
        fs::write(&stale_path, r#"{"$id": "Eold", "title": "Stale"}"#).unwrap();

        let config = SaidifyConfig::default();
        assert!(run(saider.clone(), &config, vec![fresh_path], false, false).unwrap());
        assert!(!run(saider, &config, vec![stale_path.clone()], false, false).unwrap());
        assert_eq!(
            fs::read_to_string(&stale_path).unwrap(),
            r#"{"$id": "Eold", "title": "Stale"}"#
        );
    }
}

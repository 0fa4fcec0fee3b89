//! Rewrite command implementation.

use saidify_canonical::Saider;
use saidify_store::{BatchRunner, FsStore, Rewriter};
use std::path::PathBuf;

use super::resolve_documents;
use crate::config::SaidifyConfig;
use crate::naming::ConstantNamer;
use crate::output;

/// Embeds fresh SAIDs into the selected documents.
///
/// Returns `Ok(true)` when every document was processed, `Ok(false)` when
/// some failed.
pub fn run(
    saider: Saider,
    config: &SaidifyConfig,
    files: Vec<PathBuf>,
    all: bool,
    json: bool,
    parallel: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let documents = resolve_documents(files, all, config)?;
    let field = saider.field().to_string();
    let runner = BatchRunner::new(Rewriter::new(FsStore::new(), saider));

    let report = if parallel {
        runner.run_parallel(&documents)?
    } else {
        runner.run(&documents)?
    };

    let namer = ConstantNamer::from_config(config);
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output::report_json(&report, &namer))?
        );
    } else {
        for entry in &report.entries {
            output::print_entry(entry, &field);
        }
        output::print_constants(&report, &namer);
    }

    Ok(report.is_complete())
}

//! Output formatting utilities.

use saidify_store::{BatchEntry, BatchReport};
use serde_json::{json, Value};

use crate::naming::ConstantNamer;

/// Prints the human-readable block for one document.
pub fn print_entry(entry: &BatchEntry, field: &str) {
    println!("Processing: {}", entry.location.display());
    match &entry.result {
        Ok(outcome) => {
            println!(
                "  Old {}: {}",
                field,
                outcome.previous.as_deref().unwrap_or("(none)")
            );
            println!("  New {}: {}", field, outcome.said);
            if outcome.changed {
                println!("  Updated!");
            } else {
                println!("  (no change)");
            }
        }
        Err(err) => println!("  Error: {}", err),
    }
}

/// Prints one `const NAME = 'SAID';` line per successful document.
pub fn print_constants(report: &BatchReport, namer: &ConstantNamer) {
    if report.successes().next().is_none() {
        return;
    }
    println!("\n=== SAIDs for code ===\n");
    for outcome in report.successes() {
        println!(
            "const {} = '{}';",
            namer.for_path(&outcome.location),
            outcome.said
        );
    }
}

/// Prints the verification table header.
#[allow(clippy::print_literal)]
pub fn print_table_header() {
    println!("{:<44} {:<10} {}", "SAID", "STATUS", "DOCUMENT");
    println!("{}", "-".repeat(100));
}

/// Formats one verification row.
pub fn format_table_row(entry: &BatchEntry) -> String {
    match &entry.result {
        Ok(outcome) => {
            let status = if outcome.changed { "stale" } else { "ok" };
            format!(
                "{:<44} {:<10} {}",
                outcome.said,
                status,
                entry.location.display()
            )
        }
        Err(err) => format!(
            "{:<44} {:<10} {} ({})",
            "-",
            err.kind().to_string(),
            entry.location.display(),
            err
        ),
    }
}

/// JSON form of a report, one object per attempted document.
pub fn report_json(report: &BatchReport, namer: &ConstantNamer) -> Value {
    let entries: Vec<Value> = report
        .entries
        .iter()
        .map(|entry| match &entry.result {
            Ok(outcome) => json!({
                "location": entry.location.display().to_string(),
                "previous": outcome.previous,
                "said": outcome.said,
                "changed": outcome.changed,
                "constant": namer.for_path(&entry.location),
            }),
            Err(err) => json!({
                "location": entry.location.display().to_string(),
                "error": err.to_string(),
                "kind": err.kind().to_string(),
            }),
        })
        .collect();
    Value::Array(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use saidify_canonical::Said;
    use saidify_store::{RewriteOutcome, StoreError};
    use std::path::PathBuf;

    fn report() -> BatchReport {
        BatchReport {
            entries: vec![
                BatchEntry {
                    location: PathBuf::from("matou-foo.json"),
                    result: Ok(RewriteOutcome {
                        location: PathBuf::from("matou-foo.json"),
                        previous: None,
                        said: Said::new(format!("E{}", "A".repeat(43))),
                        changed: true,
                    }),
                },
                BatchEntry {
                    location: PathBuf::from("matou-bar.json"),
                    result: Err(StoreError::NotFound(PathBuf::from("matou-bar.json"))),
                },
            ],
        }
    }

    #[test]
    fn json_report_lists_every_document() {
        let namer = ConstantNamer::new("matou-", "_SCHEMA", "_SAID");
        let value = report_json(&report(), &namer);
        let entries = value.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["constant"], "FOO_SAID");
        assert_eq!(entries[0]["previous"], Value::Null);
        assert_eq!(entries[1]["kind"], "NotFound");
    }

    #[test]
    fn table_row_shows_status_and_errors() {
        let report = report();
        let ok_row = format_table_row(&report.entries[0]);
        assert!(ok_row.contains("stale"));
        assert!(ok_row.ends_with("matou-foo.json"));
        let err_row = format_table_row(&report.entries[1]);
        assert!(err_row.contains("NotFound"));
    }

    #[test]
    fn table_row_keeps_long_saids_whole() {
        let said = Said::new(format!("0G{}", "A".repeat(86)));
        let entry = BatchEntry {
            location: PathBuf::from("matou-foo.json"),
            result: Ok(RewriteOutcome {
                location: PathBuf::from("matou-foo.json"),
                previous: Some(said.as_ref().to_string()),
                said: said.clone(),
                changed: false,
            }),
        };
        let row = format_table_row(&entry);
        assert!(row.starts_with(&format!("{} ok", said)));
    }
}

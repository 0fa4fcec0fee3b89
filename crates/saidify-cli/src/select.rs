//! Document selection for `--all`.

use std::io;
use std::path::{Path, PathBuf};

/// Lists files in `dir` named `<prefix>*.<extension>`, sorted by path.
pub fn matching_documents(dir: &Path, prefix: &str, extension: &str) -> io::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let name_matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(prefix));
        let ext_matches = path.extension().and_then(|e| e.to_str()) == Some(extension);
        if name_matches && ext_matches {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn selects_prefixed_json_files_in_order() {
        let temp = TempDir::new().unwrap();
        for name in [
            "matou-b.json",
            "matou-a.json",
            "other.json",
            "matou-c.txt",
            "matou-d.json.bak",
        ] {
            std::fs::write(temp.path().join(name), "{}").unwrap();
        }
        std::fs::create_dir(temp.path().join("matou-dir.json")).unwrap();

        let found = matching_documents(temp.path(), "matou-", "json").unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["matou-a.json", "matou-b.json"]);
    }

    #[test]
    fn missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        assert!(matching_documents(&temp.path().join("nope"), "matou-", "json").is_err());
    }
}

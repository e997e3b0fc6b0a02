//! File Command
//!
//! Analyze a single file and print its structure as JSON.

use std::path::Path;

use crate::analyzer::FileAnalyzer;
use crate::types::{FileAnalysis, Result};

/// `base` defaults to the file's parent directory.
pub fn run(file: &Path, base: Option<&Path>) -> Result<()> {
    let analysis = analyze(file, base)?;
    println!("{}", serde_json::to_string_pretty(&analysis)?);
    Ok(())
}

pub fn analyze(file: &Path, base: Option<&Path>) -> Result<FileAnalysis> {
    let base = base
        .or_else(|| file.parent())
        .unwrap_or_else(|| Path::new(""));
    Ok(FileAnalyzer::analyze_path(file, base)?.analysis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FileClassification, WeaveError};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_base_to_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("urls.py");
        fs::write(&path, "def index(request):\n    return None\n").unwrap();

        let analysis = analyze(&path, None).unwrap();
        assert_eq!(analysis.relative_path, "urls.py");
        assert_eq!(analysis.classification, FileClassification::Controller);
        assert_eq!(analysis.module().map(|m| m.name.as_str()), Some("urls"));
    }

    #[test]
    fn test_explicit_base() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("api")).unwrap();
        let path = dir.path().join("api/routes.py");
        fs::write(&path, "x = 1\n").unwrap();

        let analysis = analyze(&path, Some(dir.path())).unwrap();
        assert_eq!(analysis.relative_path, "api/routes.py");
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = analyze(&dir.path().join("nope.py"), None);
        assert!(matches!(result, Err(WeaveError::Read { .. })));
    }
}

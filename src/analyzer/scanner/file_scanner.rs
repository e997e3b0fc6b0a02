use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::constants::scanner::{DEFAULT_EXTENSIONS, DEFAULT_MAX_FILE_SIZE, DEFAULT_SKIP_DIRS};
use crate::types::{Result, WeaveError, log_filter_error};

/// Project-local ignore file, gitignore syntax
pub const IGNORE_FILE_NAME: &str = ".pyweaveignore";

pub struct FileScanner {
    root: PathBuf,
    exclude: Vec<glob::Pattern>,
    extensions: Vec<String>,
    max_file_size: u64,
}

impl FileScanner {
    /// Scanner for Python sources with default skip directories.
    pub fn python_files<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            exclude: Vec::new(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }

    /// Glob patterns matched against root-relative paths (`migrations/**`).
    pub fn with_exclude(mut self, patterns: &[String]) -> Result<Self> {
        self.exclude = patterns
            .iter()
            .map(|p| {
                glob::Pattern::new(p)
                    .map_err(|e| WeaveError::Config(format!("Invalid exclude pattern '{}': {}", p, e)))
            })
            .collect::<Result<_>>()?;
        Ok(self)
    }

    pub fn with_extensions(mut self, extensions: &[String]) -> Self {
        self.extensions = extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_string())
            .collect();
        self
    }

    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files to analyze, sorted by path for stable output.
    pub fn scan(&self) -> Result<Vec<ScannedFile>> {
        if !self.root.exists() {
            return Err(WeaveError::invalid_path(
                self.root.display().to_string(),
                "does not exist",
            ));
        }

        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .add_custom_ignore_filename(IGNORE_FILE_NAME)
            .follow_links(false)
            .filter_entry(|entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir
                    && entry
                        .file_name()
                        .to_str()
                        .is_some_and(|name| DEFAULT_SKIP_DIRS.contains(&name)))
            })
            .build();

        let mut files = Vec::new();

        for entry in walker.filter_map(|e| log_filter_error(e, "walking directory")) {
            let path = entry.path();

            if !path.is_file() || !self.check_extension(path) || self.should_exclude(path) {
                continue;
            }

            let Some(metadata) = log_filter_error(path.metadata(), "reading file metadata") else {
                continue;
            };
            if metadata.len() > self.max_file_size {
                tracing::debug!(path = %path.display(), size = metadata.len(), "skipping large file");
                continue;
            }

            files.push(ScannedFile {
                path: path.to_path_buf(),
                size: metadata.len(),
            });
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    fn should_exclude(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let relative = relative.to_string_lossy().replace('\\', "/");
        self.exclude.iter().any(|p| p.matches(&relative))
    }

    fn check_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e == ext))
    }
}

#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    pub size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn relative_paths(scanner: &FileScanner) -> Vec<String> {
        scanner
            .scan()
            .unwrap()
            .into_iter()
            .map(|f| {
                f.path
                    .strip_prefix(scanner.root())
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_finds_python_files_only() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "app/models.py", "class A: pass");
        touch(dir.path(), "app/README.md", "# docs");
        touch(dir.path(), "stubs/api.pyi", "def f() -> int: ...");

        let scanner = FileScanner::python_files(dir.path());
        assert_eq!(relative_paths(&scanner), vec!["app/models.py", "stubs/api.pyi"]);
    }

    #[test]
    fn test_skips_default_dirs() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "app/views.py", "");
        touch(dir.path(), "app/__pycache__/views.py", "");
        touch(dir.path(), ".venv/lib/site.py", "");

        let scanner = FileScanner::python_files(dir.path());
        assert_eq!(relative_paths(&scanner), vec!["app/views.py"]);
    }

    #[test]
    fn test_exclude_patterns() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "app/views.py", "");
        touch(dir.path(), "app/migrations/0001_initial.py", "");

        let scanner = FileScanner::python_files(dir.path())
            .with_exclude(&["**/migrations/**".to_string()])
            .unwrap();
        assert_eq!(relative_paths(&scanner), vec!["app/views.py"]);
    }

    #[test]
    fn test_invalid_exclude_pattern() {
        let result = FileScanner::python_files(".").with_exclude(&["[".to_string()]);
        assert!(matches!(result, Err(WeaveError::Config(_))));
    }

    #[test]
    fn test_ignore_file_respected() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "keep.py", "");
        touch(dir.path(), "generated/skip.py", "");
        touch(dir.path(), IGNORE_FILE_NAME, "generated/\n");

        let scanner = FileScanner::python_files(dir.path());
        assert_eq!(relative_paths(&scanner), vec!["keep.py"]);
    }

    #[test]
    fn test_max_file_size() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "small.py", "x = 1");
        touch(dir.path(), "big.py", &"x = 1\n".repeat(100));

        let scanner = FileScanner::python_files(dir.path()).with_max_file_size(10);
        assert_eq!(relative_paths(&scanner), vec!["small.py"]);
    }

    #[test]
    fn test_custom_extensions() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "a.py", "");
        touch(dir.path(), "b.pyw", "");

        let scanner = FileScanner::python_files(dir.path()).with_extensions(&[".pyw".to_string()]);
        assert_eq!(relative_paths(&scanner), vec!["b.pyw"]);
    }

    #[test]
    fn test_missing_root() {
        let scanner = FileScanner::python_files("/definitely/not/here");
        assert!(matches!(scanner.scan(), Err(WeaveError::InvalidPath { .. })));
    }
}

//! Shared utility functions.
//!
//! ## Path Helpers
//!
//! Analyzer inputs are plain strings that may use either separator
//! convention, so these helpers treat `/` and `\` as equivalent:
//! - `normalize_separators` - Rewrite `\` to `/`
//! - `file_name`, `file_stem` - Last path component, with/without extension
//! - `relative_to` - Strip a base prefix

use std::fmt::Display;

use crate::constants::analysis::BYTES_PER_TOKEN;

// =============================================================================
// Path Helpers
// =============================================================================

#[inline]
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Last component of a path, accepting either separator.
pub fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// File name without its final extension (`models.py` -> `models`).
pub fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}

/// Path relative to `base`, with leading separators stripped.
///
/// Returns the path unchanged when `base` is not a whole-segment prefix
/// (`/repo` is not a prefix of `/repo_tests/x.py`).
pub fn relative_to<'a>(path: &'a str, base: &str) -> &'a str {
    const SEPARATORS: [char; 2] = ['/', '\\'];

    if base.is_empty() {
        return path.trim_start_matches(SEPARATORS);
    }
    match path.strip_prefix(base) {
        Some(rest)
            if rest.is_empty() || rest.starts_with(SEPARATORS) || base.ends_with(SEPARATORS) =>
        {
            rest.trim_start_matches(SEPARATORS)
        }
        _ => path,
    }
}

// =============================================================================
// Token Estimation
// =============================================================================

/// Estimate token count from a byte size.
#[inline]
pub fn estimate_tokens(size_bytes: usize) -> usize {
    size_bytes / BYTES_PER_TOKEN
}

// =============================================================================
// Error Filtering
// =============================================================================

/// Convert a result to an option, logging the error at debug level.
///
/// ```ignore
/// let files: Vec<_> = entries
///     .filter_map(|r| log_filter_error(r, "reading entry"))
///     .collect();
/// ```
pub fn log_filter_error<T, E: Display>(result: Result<T, E>, context: &str) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::debug!("{}: {}", context, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_both_separators() {
        assert_eq!(file_name("app/models/user.py"), "user.py");
        assert_eq!(file_name(r"app\models\user.py"), "user.py");
        assert_eq!(file_name("user.py"), "user.py");
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("pkg/user_service.py"), "user_service");
        assert_eq!(file_stem("archive.tar.gz"), "archive.tar");
        assert_eq!(file_stem(".env"), ".env");
        assert_eq!(file_stem("Makefile"), "Makefile");
    }

    #[test]
    fn test_relative_to() {
        assert_eq!(relative_to("/repo/app/views.py", "/repo"), "app/views.py");
        assert_eq!(relative_to("/repo/app/views.py", "/repo/"), "app/views.py");
        assert_eq!(relative_to(r"C:\repo\app\views.py", r"C:\repo"), r"app\views.py");
        assert_eq!(relative_to("/other/x.py", "/repo"), "/other/x.py");
        assert_eq!(relative_to("x.py", ""), "x.py");
    }

    #[test]
    fn test_relative_to_respects_segment_boundary() {
        assert_eq!(
            relative_to("/repo_tests/app/x.py", "/repo"),
            "/repo_tests/app/x.py"
        );
        assert_eq!(relative_to(r"C:\repo2\x.py", r"C:\repo"), r"C:\repo2\x.py");
        assert_eq!(relative_to("/repo", "/repo"), "");
    }

    #[test]
    fn test_estimate_tokens() {
        assert_eq!(estimate_tokens(0), 0);
        assert_eq!(estimate_tokens(7), 1);
        assert_eq!(estimate_tokens(400), 100);
    }

    #[test]
    fn test_log_filter_error() {
        let ok: Result<u8, String> = Ok(3);
        let err: Result<u8, String> = Err("bad".to_string());
        assert_eq!(log_filter_error(ok, "ctx"), Some(3));
        assert_eq!(log_filter_error(err, "ctx"), None);
    }
}

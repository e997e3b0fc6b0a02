//! Docstring Extraction
//!
//! Triple-quoted string literals opening a module, class or function body.

use crate::constants::analysis::DOCSTRING_DELIMITERS;

/// Triple-quoted docstring starting at `lines[idx]`, flattened to one line.
///
/// Multi-line docstrings are joined with single spaces. Returns `None` when
/// the line does not open a docstring, the docstring is never closed, or it
/// has no content.
pub fn extract_docstring(lines: &[&str], idx: usize) -> Option<String> {
    let first = lines.get(idx)?.trim();
    let delimiter = DOCSTRING_DELIMITERS
        .iter()
        .copied()
        .find(|d| first.starts_with(d))?;
    let rest = &first[delimiter.len()..];

    if let Some(close) = rest.find(delimiter) {
        return non_empty(rest[..close].trim().to_string());
    }

    let mut fragments = vec![rest.trim()];
    for line in &lines[idx + 1..] {
        let line = line.trim();
        if let Some(close) = line.find(delimiter) {
            fragments.push(line[..close].trim());
            let joined = fragments
                .into_iter()
                .filter(|f| !f.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            return non_empty(joined);
        }
        fragments.push(line);
    }

    None
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() { None } else { Some(text) }
}

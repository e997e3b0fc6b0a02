//! Import Extraction
//!
//! Recognizes `import a, b as c` and `from pkg.mod import x, y` statements and
//! normalizes them to module paths.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static FROM_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*from\s+([\w.]+)\s+import\b").expect("valid from-import pattern")
});

static BARE_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*import\s+(.+)$").expect("valid import pattern"));

/// Module paths imported by `content`, deduplicated in first-seen order.
pub fn extract_imports(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut imports = Vec::new();

    for line in content.lines() {
        let code = strip_trailing(line);
        for module in modules_on_line(code) {
            if !module.is_empty() && seen.insert(module) {
                imports.push(module.to_string());
            }
        }
    }

    imports
}

/// First dotted segment of each import, deduplicated.
///
/// Relative imports (`.models`, `..`) name local modules and yield no root.
pub fn dependency_roots(imports: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    imports
        .iter()
        .filter_map(|module| module.split('.').next())
        .filter(|root| !root.is_empty())
        .filter(|root| seen.insert(*root))
        .map(String::from)
        .collect()
}

fn modules_on_line(code: &str) -> Vec<&str> {
    if let Some(caps) = FROM_IMPORT.captures(code) {
        return caps.get(1).map(|m| vec![m.as_str()]).unwrap_or_default();
    }

    let Some(caps) = BARE_IMPORT.captures(code) else {
        return Vec::new();
    };
    let Some(names) = caps.get(1) else {
        return Vec::new();
    };

    names
        .as_str()
        .split(',')
        .filter_map(|token| token.split_whitespace().next())
        .collect()
}

/// Drop comments and statements chained with `;`.
fn strip_trailing(line: &str) -> &str {
    let end = line.find(['#', ';']).unwrap_or(line.len());
    &line[..end]
}

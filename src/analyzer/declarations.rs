//! Declaration Extraction
//!
//! Top-level `class` declarations with their base lists, extents, docstrings
//! and methods. Nested classes are not recognized as types; their methods are
//! reported as members of the enclosing class.

use regex::Regex;
use std::sync::LazyLock;

use super::blocks::block_end;
use super::docstring::extract_docstring;
use super::members::{MemberOwner, extract_class_members};
use crate::types::{CallSite, CodeTypeInfo, TypeKind};

static CLASS_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^class\s+([A-Za-z_]\w*)\s*(?:\((.*?)\))?\s*:").expect("valid class header pattern")
});

/// A declared type plus the calls observed in its methods.
#[derive(Debug, Clone)]
pub struct ExtractedType {
    pub info: CodeTypeInfo,
    pub calls: Vec<CallSite>,
}

/// Column-0 class declarations in discovery order.
pub fn extract_types(lines: &[&str], file_path: &str) -> Vec<ExtractedType> {
    lines
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| {
            let caps = CLASS_HEADER.captures(line)?;
            let name = caps.get(1)?.as_str();
            let bases = caps.get(2).map_or("", |m| m.as_str());
            Some(build_type(lines, idx, name, bases, file_path))
        })
        .collect()
}

fn build_type(
    lines: &[&str],
    idx: usize,
    name: &str,
    bases: &str,
    file_path: &str,
) -> ExtractedType {
    let end = block_end(lines, idx, 0);
    let (base_type, interfaces) = split_bases(bases);

    let owner = MemberOwner {
        type_name: name,
        file_path,
    };
    let (members, calls): (Vec<_>, Vec<_>) = extract_class_members(lines, idx + 1, end, owner)
        .into_iter()
        .map(|m| (m.info, m.calls))
        .unzip();

    tracing::trace!(
        class = name,
        start = idx + 1,
        end = end + 1,
        members = members.len(),
        "extracted class"
    );

    ExtractedType {
        info: CodeTypeInfo {
            name: name.to_string(),
            full_name: name.to_string(),
            kind: TypeKind::Class,
            base_type,
            interfaces,
            start_line: idx + 1,
            end_line: end + 1,
            docstring: extract_docstring(lines, idx + 1),
            members,
        },
        calls: calls.into_iter().flatten().collect(),
    }
}

/// First base is the primary base type; the rest are mixins/interfaces.
fn split_bases(bases: &str) -> (Option<String>, Vec<String>) {
    let mut names = bases
        .split(',')
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .map(String::from);
    let base_type = names.next();
    (base_type, names.collect())
}

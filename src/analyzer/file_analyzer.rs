//! Per-file Orchestrator
//!
//! Runs imports -> classes -> module functions -> classification over one
//! file and assembles the `FileAnalysis`. Holds no state between files; call
//! sites are handed back to the caller for cross-file aggregation.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::classifier::classify;
use super::declarations::extract_types;
use super::docstring::extract_docstring;
use super::imports::{dependency_roots, extract_imports};
use super::members::{MemberOwner, extract_module_functions};
use super::text::{LineIndex, is_blank};
use crate::types::{
    CallSite, CodeTypeInfo, FileAnalysis, Result, TypeKind, WeaveError, estimate_tokens,
    file_name, file_stem, relative_to,
};

const UTF8_BOM: char = '\u{feff}';

/// Analysis result together with the call sites found in the file.
#[derive(Debug, Clone)]
pub struct AnalyzedFile {
    pub analysis: FileAnalysis,
    pub call_sites: Vec<CallSite>,
}

pub struct FileAnalyzer;

impl FileAnalyzer {
    /// Analyze already-decoded source. Never fails; unrecognized structure
    /// just yields fewer types and members.
    pub fn analyze(file_path: &str, base_path: &str, content: &str) -> FileAnalysis {
        Self::analyze_with_calls(file_path, base_path, content).analysis
    }

    pub fn analyze_with_calls(file_path: &str, base_path: &str, content: &str) -> AnalyzedFile {
        // Line anchors must see column 0; sizes still count the BOM
        let source = content.strip_prefix(UTF8_BOM).unwrap_or(content);
        let index = LineIndex::new(source);
        let lines = index.lines();

        let imports = extract_imports(source);
        let dependencies = dependency_roots(&imports);

        let mut call_sites = Vec::new();
        let mut types = Vec::new();

        for extracted in extract_types(lines, file_path) {
            call_sites.extend(extracted.calls);
            types.push(extracted.info);
        }

        let module_name = file_stem(file_path);
        let owner = MemberOwner {
            type_name: module_name,
            file_path,
        };
        let (functions, module_calls): (Vec<_>, Vec<_>) = extract_module_functions(lines, owner)
            .into_iter()
            .map(|m| (m.info, m.calls))
            .unzip();

        if !functions.is_empty() {
            call_sites.extend(module_calls.into_iter().flatten());
            types.insert(
                0,
                CodeTypeInfo {
                    name: module_name.to_string(),
                    full_name: module_name.to_string(),
                    kind: TypeKind::Module,
                    base_type: None,
                    interfaces: Vec::new(),
                    start_line: 1,
                    end_line: index.len().max(1),
                    docstring: module_docstring(lines),
                    members: functions,
                },
            );
        }

        let mut analysis = FileAnalysis {
            path: file_path.to_string(),
            relative_path: relative_to(file_path, base_path).to_string(),
            file_name: file_name(file_path).to_string(),
            size_bytes: content.len(),
            token_estimate: estimate_tokens(content.len()),
            types,
            imports,
            dependencies,
            classification: Default::default(),
        };
        analysis.classification = classify(&analysis);

        debug!(
            path = %analysis.relative_path,
            types = analysis.types.len(),
            members = analysis.member_count(),
            imports = analysis.imports.len(),
            calls = call_sites.len(),
            classification = %analysis.classification,
            "analyzed file"
        );

        AnalyzedFile {
            analysis,
            call_sites,
        }
    }

    /// Read `path` as UTF-8 and analyze it relative to `base`.
    pub fn analyze_path(path: &Path, base: &Path) -> Result<AnalyzedFile> {
        let file_path = path
            .to_str()
            .ok_or_else(|| WeaveError::invalid_path(path.display().to_string(), "not UTF-8"))?;
        let base_path = base
            .to_str()
            .ok_or_else(|| WeaveError::invalid_path(base.display().to_string(), "not UTF-8"))?;

        let content =
            fs::read_to_string(path).map_err(|e| WeaveError::read(file_path, e))?;

        Ok(Self::analyze_with_calls(file_path, base_path, &content))
    }
}

/// Docstring on the first non-blank line of the file.
fn module_docstring(lines: &[&str]) -> Option<String> {
    let first = lines.iter().position(|l| !is_blank(l))?;
    extract_docstring(lines, first)
}

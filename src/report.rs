//! Analysis Reports
//!
//! Serializes analysis results and the aggregated call graph to the
//! configured output destination.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analyzer::{CallGraph, CallGraphSummary};
use crate::config::OutputFormat;
use crate::constants::output::{ANALYSIS_FILE_STEM, CALL_GRAPH_FILE_STEM};
use crate::types::{FileAnalysis, FileClassification, Result, ResultExt};

/// Number of call targets listed in summaries
const TOP_TARGETS: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// RFC 3339 timestamp
    pub generated_at: String,
    pub root: String,
    pub files: Vec<FileAnalysis>,
    /// Files that could not be read
    pub failed_files: Vec<FailedFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailedFile {
    pub path: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallGraphReport<'a> {
    pub generated_at: String,
    pub summary: CallGraphSummary,
    pub calls: &'a CallGraph,
}

impl AnalysisReport {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            root: root.into(),
            files: Vec::new(),
            failed_files: Vec::new(),
        }
    }

    pub fn classification_counts(&self) -> BTreeMap<FileClassification, usize> {
        let mut counts = BTreeMap::new();
        for file in &self.files {
            *counts.entry(file.classification).or_insert(0) += 1;
        }
        counts
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(self)?),
            OutputFormat::Text => Ok(self.render_text()),
        }
    }

    fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Analysis of {} ({})", self.root, self.generated_at);
        let _ = writeln!(out, "{} files analyzed", self.files.len());

        for file in &self.files {
            let _ = writeln!(
                out,
                "\n{} [{}] {} bytes, ~{} tokens",
                file.relative_path, file.classification, file.size_bytes, file.token_estimate
            );
            if !file.dependencies.is_empty() {
                let _ = writeln!(out, "  depends on: {}", file.dependencies.join(", "));
            }
            for t in &file.types {
                let base = t
                    .base_type
                    .as_deref()
                    .map(|b| format!(" ({})", b))
                    .unwrap_or_default();
                let _ = writeln!(
                    out,
                    "  {} {}{} L{}-{}",
                    t.kind.as_str(),
                    t.name,
                    base,
                    t.start_line,
                    t.end_line
                );
                for m in &t.members {
                    let prefix = if m.is_async { "async " } else { "" };
                    let _ = writeln!(
                        out,
                        "    {}{} -> {} L{}-{}",
                        prefix, m.signature, m.return_type, m.start_line, m.end_line
                    );
                }
            }
        }

        if !self.failed_files.is_empty() {
            let _ = writeln!(out, "\nFailed files:");
            for failed in &self.failed_files {
                let _ = writeln!(out, "  {}: {}", failed.path, failed.error);
            }
        }

        out
    }
}

impl<'a> CallGraphReport<'a> {
    pub fn new(graph: &'a CallGraph) -> Self {
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            summary: graph.summary(TOP_TARGETS),
            calls: graph,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(self)?),
            OutputFormat::Text => {
                let mut out = String::new();
                let s = &self.summary;
                let _ = writeln!(
                    out,
                    "{} calls from {} callers in {} files ({} distinct targets)",
                    s.total_calls, s.distinct_callers, s.files, s.distinct_targets
                );
                for (target, count) in &s.top_targets {
                    let _ = writeln!(out, "  {:>5}  {}", count, target);
                }
                Ok(out)
            }
        }
    }
}

/// Write the analysis report (and optionally the call graph) into `dir`.
/// Returns the written paths.
pub fn write_reports(
    dir: &Path,
    format: OutputFormat,
    report: &AnalysisReport,
    graph: Option<&CallGraph>,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context_fn(|| format!("creating output directory {}", dir.display()))?;

    let mut written = Vec::new();

    let path = dir.join(format!("{}.{}", ANALYSIS_FILE_STEM, format.extension()));
    fs::write(&path, report.render(format)?)
        .with_context_fn(|| format!("writing {}", path.display()))?;
    written.push(path);

    if let Some(graph) = graph {
        let path = dir.join(format!("{}.{}", CALL_GRAPH_FILE_STEM, format.extension()));
        fs::write(&path, CallGraphReport::new(graph).render(format)?)
            .with_context_fn(|| format!("writing {}", path.display()))?;
        written.push(path);
    }

    Ok(written)
}

//! Analyze Command
//!
//! Scans a Python tree, analyzes each file, merges call sites into one graph
//! and writes (or prints) the reports.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::analyzer::{CallGraph, FileAnalyzer, FileScanner};
use crate::cli::{CommandContext, Output};
use crate::config::{Config, OutputFormat};
use crate::report::{AnalysisReport, FailedFile, write_reports};
use crate::types::Result;

#[derive(Debug, Clone, Default)]
pub struct AnalyzeOptions {
    /// Overrides `output.directory`
    pub output: Option<PathBuf>,
    /// Overrides `output.format`
    pub format: Option<OutputFormat>,
    /// Print the analysis report instead of writing files
    pub stdout: bool,
    pub no_call_graph: bool,
}

pub fn run(ctx: &CommandContext, options: AnalyzeOptions, out: &Output) -> Result<()> {
    let config = ctx.config();
    let format = options.format.unwrap_or(config.output.format);
    let with_call_graph = config.output.call_graph && !options.no_call_graph;

    let (report, graph) = analyze_workspace(&ctx.workspace, &config)?;

    if options.stdout {
        print!("{}", report.render(format)?);
        return Ok(());
    }

    let dir = ctx.output_dir(options.output.as_deref());
    let written = write_reports(&dir, format, &report, with_call_graph.then_some(&graph))?;

    out.header("Analysis complete");
    out.detail("Files", report.files.len());
    out.detail(
        "Types",
        report.files.iter().map(|f| f.classes().count()).sum::<usize>(),
    );
    out.detail(
        "Members",
        report.files.iter().map(|f| f.member_count()).sum::<usize>(),
    );
    out.detail("Call sites", graph.len());
    for (classification, count) in report.classification_counts() {
        out.detail(classification.as_str(), count);
    }
    if !report.failed_files.is_empty() {
        out.warning(&format!(
            "{} file(s) could not be read",
            report.failed_files.len()
        ));
    }
    for path in &written {
        out.success(&format!("Wrote {}", path.display()));
    }

    Ok(())
}

/// Scan `root` and analyze every discovered file. Unreadable files are
/// recorded in `failed_files` and do not abort the run.
pub fn analyze_workspace(root: &Path, config: &Config) -> Result<(AnalysisReport, CallGraph)> {
    let scanner = FileScanner::python_files(root)
        .with_exclude(&config.analysis.exclude)?
        .with_extensions(&config.analysis.extensions)
        .with_max_file_size(config.analysis.max_file_size);
    let files = scanner.scan()?;
    info!("Found {} files to analyze", files.len());

    let mut report = AnalysisReport::new(root.display().to_string());
    let mut graph = CallGraph::new();

    for file in &files {
        match FileAnalyzer::analyze_path(&file.path, root) {
            Ok(analyzed) => {
                graph.merge(analyzed.call_sites);
                report.files.push(analyzed.analysis);
            }
            Err(e) if e.is_per_file() => {
                warn!("Skipping {}: {}", file.path.display(), e);
                report.failed_files.push(FailedFile {
                    path: file.path.display().to_string(),
                    error: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    info!(
        files = report.files.len(),
        failed = report.failed_files.len(),
        calls = graph.len(),
        "Analysis finished"
    );

    Ok((report, graph))
}

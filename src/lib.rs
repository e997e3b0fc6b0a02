//! pyweave - Heuristic Structural Analyzer for Python Codebases
//!
//! Extracts classes, module-level functions, methods, imports, docstrings and
//! call sites from Python source using line-oriented pattern matching, and
//! classifies each file by architectural role. No interpreter, no AST: the
//! analysis is deliberately approximate and never fails on malformed input.
//!
//! ## Quick Start
//!
//! ```
//! use pyweave::FileAnalyzer;
//!
//! let analysis = FileAnalyzer::analyze(
//!     "/repo/shop/views.py",
//!     "/repo",
//!     "class Cart(View):\n    def get(self, request):\n        pass\n",
//! );
//! assert_eq!(analysis.relative_path, "shop/views.py");
//! assert_eq!(analysis.types[0].name, "Cart");
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: per-file extraction, classification, call graph, scanning
//! - [`config`]: layered configuration and the workspace settings store
//! - [`report`]: JSON/YAML/text report rendering
//! - [`cli`]: command handlers behind the `pyweave` binary

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod report;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

pub use analyzer::{AnalyzedFile, CallGraph, FileAnalyzer, FileScanner, classify};
pub use config::{Config, ConfigLoader, SettingsStore};
pub use report::AnalysisReport;
pub use types::{
    CallSite, CodeMemberInfo, CodeTypeInfo, FileAnalysis, FileClassification, Result, ResultExt,
    WeaveError,
};

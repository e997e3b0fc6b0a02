//! Code Analyzer Module
//!
//! Heuristic structural analysis of Python source without a grammar:
//! - Line-oriented class and function extraction with indentation-based extents
//! - Import and dependency-root extraction
//! - Naive call-site extraction and cross-file call graph aggregation
//! - Architectural role classification
//! - File scanning with gitignore support

pub mod blocks;
pub mod call_graph;
pub mod calls;
pub mod classifier;
pub mod declarations;
pub mod docstring;
pub mod file_analyzer;
pub mod imports;
pub mod members;
pub mod scanner;
pub mod text;

pub use call_graph::{CallGraph, CallGraphSummary};
pub use classifier::{FileFacts, classify};
pub use file_analyzer::{AnalyzedFile, FileAnalyzer};
pub use scanner::{FileScanner, ScannedFile};
pub use text::LineIndex;

//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// Source analysis constants
pub mod analysis {
    /// Indentation width contributed by a tab character
    pub const TAB_WIDTH: usize = 4;

    /// Bytes per estimated LLM token
    pub const BYTES_PER_TOKEN: usize = 4;

    /// Parameter name that binds the class in classmethod-style members
    pub const CLASS_REFERENCE_PARAM: &str = "cls";

    /// Decorator that marks a member as static
    pub const STATIC_DECORATOR: &str = "staticmethod";

    /// Docstring delimiters, checked in order
    pub const DOCSTRING_DELIMITERS: [&str; 2] = ["\"\"\"", "'''"];
}

/// File discovery constants
pub mod scanner {
    /// Default maximum file size for analysis (1MB)
    pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_048_576;

    /// Extensions analyzed by default
    pub const DEFAULT_EXTENSIONS: &[&str] = &["py", "pyi"];

    /// Directories never worth descending into
    pub const DEFAULT_SKIP_DIRS: &[&str] = &[
        "__pycache__",
        ".venv",
        "venv",
        ".tox",
        ".git",
        "build",
        "dist",
        "node_modules",
        ".mypy_cache",
    ];
}

/// Output constants
pub mod output {
    /// Default directory for analysis reports
    pub const DEFAULT_OUTPUT_DIR: &str = ".pyweave/out";

    /// File stem of the per-file analysis report
    pub const ANALYSIS_FILE_STEM: &str = "analysis";

    /// File stem of the aggregated call graph
    pub const CALL_GRAPH_FILE_STEM: &str = "call_graph";
}

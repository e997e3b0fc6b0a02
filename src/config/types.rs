//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/pyweave/) and project (.pyweave/) level configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::output::DEFAULT_OUTPUT_DIR;
use crate::constants::scanner::{DEFAULT_EXTENSIONS, DEFAULT_MAX_FILE_SIZE};
use crate::types::{Result, WeaveError};

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// File discovery settings
    pub analysis: AnalysisConfig,

    /// Report output settings
    pub output: OutputConfig,

    /// Diagnostic logging settings
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            analysis: AnalysisConfig::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `WeaveError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if self.analysis.max_file_size == 0 {
            return Err(WeaveError::Config(
                "analysis.max_file_size must be greater than 0".to_string(),
            ));
        }

        if self.analysis.extensions.is_empty() {
            return Err(WeaveError::Config(
                "analysis.extensions must list at least one extension".to_string(),
            ));
        }

        if let Some(pattern) = self
            .analysis
            .exclude
            .iter()
            .find(|p| glob::Pattern::new(p).is_err())
        {
            return Err(WeaveError::Config(format!(
                "analysis.exclude contains an invalid glob: {}",
                pattern
            )));
        }

        if tracing_subscriber::EnvFilter::try_new(&self.logging.level).is_err() {
            return Err(WeaveError::Config(format!(
                "logging.level is not a valid filter: {}",
                self.logging.level
            )));
        }

        Ok(())
    }
}

// =============================================================================
// Analysis Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Glob patterns (root-relative) to skip
    pub exclude: Vec<String>,

    /// Maximum file size in bytes
    pub max_file_size: u64,

    /// File extensions to analyze
    pub extensions: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            exclude: vec!["**/migrations/**".to_string()],
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

// =============================================================================
// Output Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving report files
    pub directory: PathBuf,

    pub format: OutputFormat,

    /// Also write the aggregated call graph
    pub call_graph: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: OutputFormat::Json,
            call_graph: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    /// Human-readable summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Text => "txt",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "text" | "txt" => Ok(OutputFormat::Text),
            _ => Err(format!(
                "Unknown output format: {}. Valid values: json, yaml, text",
                s
            )),
        }
    }
}

// =============================================================================
// Logging Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when RUST_LOG is unset
    pub level: String,

    /// Append timestamped diagnostics to this file
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

//! Unified Error Type System
//!
//! Centralized error type for the crate.
//!
//! ## Design Principles
//!
//! - Single error type (WeaveError) for every fallible operation
//! - Heuristic parsing never fails: malformed source degrades to empty results,
//!   so errors only come from I/O, configuration and serialization
//! - No panic/unwrap outside tests

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeaveError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid path {path}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Output error: {0}")]
    Output(String),
}

impl WeaveError {
    pub fn read(path: impl Into<String>, source: std::io::Error) -> Self {
        WeaveError::Read {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        WeaveError::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// I/O failures while reading one file are skippable during a directory scan
    pub fn is_per_file(&self) -> bool {
        matches!(self, WeaveError::Read { .. } | WeaveError::InvalidPath { .. })
    }
}

pub type Result<T> = std::result::Result<T, WeaveError>;

/// Context extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> Result<T>;

    /// Add context using a closure (lazy evaluation)
    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> Result<T> {
        self.map_err(|e| WeaveError::Output(format!("{}: {}", context.into(), e)))
    }

    fn with_context_fn<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| WeaveError::Output(format!("{}: {}", f().into(), e)))
    }
}

// =============================================================================
// Tests
// =============================================================================

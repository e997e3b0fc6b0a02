//! CLI Common Utilities
//!
//! Workspace resolution and the context shared by command handlers.

use std::path::{Path, PathBuf};

use crate::config::{Config, SettingsStore};
use crate::types::{Result, WeaveError};

/// Command execution context
pub struct CommandContext {
    /// Directory being analyzed; project config lives under it
    pub workspace: PathBuf,
    /// Settings keyed by `workspace`
    pub settings: SettingsStore,
}

impl CommandContext {
    /// Context over explicit settings, nothing read from disk.
    pub fn new(workspace: PathBuf, config: Config) -> Self {
        let settings = SettingsStore::new(workspace.clone(), config);
        Self {
            workspace,
            settings,
        }
    }

    /// Resolve the workspace and open its settings.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let workspace = resolve_workspace(path)?;
        let settings = SettingsStore::open(&workspace)?;
        Ok(Self {
            workspace,
            settings,
        })
    }

    /// Current settings snapshot
    pub fn config(&self) -> Config {
        self.settings.current()
    }

    /// Report directory: explicit override, else `output.directory` resolved
    /// against the workspace when relative.
    pub fn output_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        if let Some(dir) = override_dir {
            return dir.to_path_buf();
        }
        let dir = self.settings.current().output.directory;
        if dir.is_relative() {
            self.workspace.join(dir)
        } else {
            dir
        }
    }
}

/// `path` (or the current directory), which must be an existing directory.
pub fn resolve_workspace(path: Option<&Path>) -> Result<PathBuf> {
    let workspace = match path {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir()?,
    };

    if !workspace.is_dir() {
        return Err(WeaveError::invalid_path(
            workspace.display().to_string(),
            "not a directory",
        ));
    }

    Ok(workspace)
}

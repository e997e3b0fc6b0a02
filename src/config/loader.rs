//! Configuration Loader (Figment-based)
//!
//! Loads and merges configuration from multiple sources using Figment:
//! 1. Built-in defaults (Serialized)
//! 2. Global config (~/.config/pyweave/config.toml)
//! 3. Project config (<workspace>/.pyweave/config.toml)
//! 4. Environment variables (PYWEAVE_* prefix)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::Config;
use crate::types::{Result, WeaveError};

/// Project data directory name
pub const PROJECT_DIR_NAME: &str = ".pyweave";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for `workspace` with full resolution chain:
    /// defaults → global → project → env vars
    pub fn load(workspace: &Path) -> Result<Config> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        // Merge global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            debug!("Loading global config from: {}", global_path.display());
            figment = figment.merge(Toml::file(&global_path));
        }

        // Merge project config
        let project_path = Self::project_config_path(workspace);
        if project_path.exists() {
            debug!("Loading project config from: {}", project_path.display());
            figment = figment.merge(Toml::file(&project_path));
        }

        // Merge environment variables (e.g., PYWEAVE_OUTPUT_FORMAT -> output.format)
        figment = figment.merge(Env::prefixed("PYWEAVE_").split('_').lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| WeaveError::Config(format!("Configuration error: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from a specific file only
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(|e| WeaveError::Config(format!("Configuration error: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    // =========================================================================
    // Path Management
    // =========================================================================

    /// Get path to global config directory (~/.config/pyweave/)
    pub fn global_dir() -> Option<PathBuf> {
        env::var("XDG_CONFIG_HOME")
            .ok()
            .map(PathBuf::from)
            .or_else(|| {
                env::var("HOME")
                    .ok()
                    .map(|home| PathBuf::from(home).join(".config"))
            })
            .map(|p| p.join("pyweave"))
    }

    /// Get path to global config file
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get project data directory
    pub fn project_dir(workspace: &Path) -> PathBuf {
        workspace.join(PROJECT_DIR_NAME)
    }

    /// Get path to project config file
    pub fn project_config_path(workspace: &Path) -> PathBuf {
        Self::project_dir(workspace).join("config.toml")
    }

    // =========================================================================
    // Config Commands
    // =========================================================================

    /// Show config file paths
    pub fn show_path(workspace: &Path) {
        println!("Configuration paths:");
        println!();

        if let Some(global) = Self::global_config_path() {
            let exists = if global.exists() { "✓" } else { "✗" };
            println!("  Global:  {} {}", exists, global.display());
        } else {
            println!("  Global:  (not available)");
        }

        let project = Self::project_config_path(workspace);
        let exists = if project.exists() { "✓" } else { "✗" };
        println!("  Project: {} {}", exists, project.display());
    }

    /// Show current effective configuration
    pub fn show_config(workspace: &Path, as_json: bool) -> Result<()> {
        let config = Self::load(workspace)?;

        if as_json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            println!("{}", toml::to_string_pretty(&config)?);
        }

        Ok(())
    }
}

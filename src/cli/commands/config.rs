//! Config Command
//!
//! Usage:
//!   pyweave config show [-f json]
//!   pyweave config path
//!   pyweave config init [--force]

use std::path::Path;

use crate::cli::Output;
use crate::config::{ConfigLoader, SettingsStore};
use crate::types::Result;

/// Show the effective configuration (TOML, or JSON with `-f json`)
pub fn show(workspace: &Path, format: &str) -> Result<()> {
    ConfigLoader::show_config(workspace, format == "json")
}

pub fn path(workspace: &Path) -> Result<()> {
    ConfigLoader::show_path(workspace);
    Ok(())
}

pub fn init(workspace: &Path, force: bool, out: &Output) -> Result<()> {
    let path = SettingsStore::init(workspace, force)?;
    out.success("Initialized project configuration");
    out.detail("Config", path.display());
    Ok(())
}

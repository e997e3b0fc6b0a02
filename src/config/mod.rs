//! Configuration Management
//!
//! Unified configuration system with hierarchical resolution:
//! 1. Built-in defaults
//! 2. Global config (~/.config/pyweave/config.toml)
//! 3. Project config (.pyweave/config.toml)
//! 4. Environment variables (PYWEAVE_*)
//! 5. CLI arguments (highest priority)
//!
//! `SettingsStore` adds per-workspace save and change notification.

mod loader;
mod store;
mod types;

pub use loader::{ConfigLoader, PROJECT_DIR_NAME};
pub use store::SettingsStore;
pub use types::*;

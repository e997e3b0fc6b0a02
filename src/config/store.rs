//! Workspace Settings Store
//!
//! Load/save of the configuration keyed by workspace path, with change
//! notification through a `tokio::sync::watch` channel. Subscribers always see
//! the latest saved configuration; intermediate values may be skipped.
//!
//! The store starts from the effective configuration (defaults, global,
//! project, env) and saves to the project file.

use std::fs;
use std::path::{Path, PathBuf};

use tokio::sync::watch;
use tracing::{debug, info};

use super::loader::ConfigLoader;
use super::types::Config;
use crate::types::Result;

pub struct SettingsStore {
    workspace: PathBuf,
    sender: watch::Sender<Config>,
}

impl SettingsStore {
    /// Open the store for `workspace` with its effective configuration.
    pub fn open<P: AsRef<Path>>(workspace: P) -> Result<Self> {
        let workspace = workspace.as_ref().to_path_buf();
        debug!("Opening settings for: {}", workspace.display());
        let config = ConfigLoader::load(&workspace)?;
        Ok(Self::new(workspace, config))
    }

    /// Store seeded with `config`, without reading any file.
    pub fn new(workspace: PathBuf, config: Config) -> Self {
        let (sender, _) = watch::channel(config);
        Self { workspace, sender }
    }

    /// Write default settings to the project file unless one exists
    /// (`force` overwrites). Works even when the existing file is invalid.
    pub fn init<P: AsRef<Path>>(workspace: P, force: bool) -> Result<PathBuf> {
        let store = Self::new(workspace.as_ref().to_path_buf(), Config::default());
        let path = store.config_path();

        if path.exists() && !force {
            info!("Project config exists: {}", path.display());
        } else {
            store.save(Config::default())?;
        }

        Ok(path)
    }

    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    pub fn config_path(&self) -> PathBuf {
        ConfigLoader::project_config_path(&self.workspace)
    }

    /// Snapshot of the current settings
    pub fn current(&self) -> Config {
        self.sender.borrow().clone()
    }

    /// Receiver notified on every successful save
    pub fn subscribe(&self) -> watch::Receiver<Config> {
        self.sender.subscribe()
    }

    /// Validate, persist and publish `config`.
    pub fn save(&self, config: Config) -> Result<()> {
        config.validate()?;

        let path = self.config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml::to_string_pretty(&config)?)?;
        info!("Saved settings: {}", path.display());

        self.sender.send_replace(config);
        Ok(())
    }

    /// Apply `f` to a copy of the current settings and save the result.
    pub fn update<F>(&self, f: F) -> Result<Config>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.current();
        f(&mut config);
        self.save(config.clone())?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use tempfile::TempDir;

    #[test]
    fn test_open_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::open(dir.path()).unwrap();
        assert_eq!(store.current(), Config::default());
        assert!(!store.config_path().exists());
    }

    #[test]
    fn test_init_writes_defaults_once() {
        let dir = TempDir::new().unwrap();
        let path = SettingsStore::init(dir.path(), false).unwrap();
        assert_eq!(path, dir.path().join(".pyweave/config.toml"));
        assert_eq!(
            ConfigLoader::load_from_file(&path).unwrap(),
            Config::default()
        );

        fs::write(&path, "[output]\nformat = \"yaml\"\n").unwrap();
        SettingsStore::init(dir.path(), false).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("yaml"));
    }

    #[test]
    fn test_init_force_replaces_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = ConfigLoader::project_config_path(dir.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[analysis]\nmax_file_size = 0\n").unwrap();
        assert!(SettingsStore::open(dir.path()).is_err());

        SettingsStore::init(dir.path(), true).unwrap();
        let store = SettingsStore::open(dir.path()).unwrap();
        assert_eq!(
            store.current().analysis.max_file_size,
            Config::default().analysis.max_file_size
        );
    }

    #[test]
    fn test_save_persists_and_reloads() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::open(dir.path()).unwrap();

        let mut config = store.current();
        config.output.directory = PathBuf::from("reports");
        store.save(config).unwrap();

        let reopened = SettingsStore::open(dir.path()).unwrap();
        assert_eq!(reopened.current().output.directory, PathBuf::from("reports"));
    }

    #[test]
    fn test_subscribers_notified() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::open(dir.path()).unwrap();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store
            .update(|c| c.output.format = OutputFormat::Yaml)
            .unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().output.format, OutputFormat::Yaml);
    }

    #[test]
    fn test_invalid_save_rejected_without_notification() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::open(dir.path()).unwrap();
        let rx = store.subscribe();

        let result = store.update(|c| c.analysis.max_file_size = 0);
        assert!(result.is_err());
        assert!(!rx.has_changed().unwrap());
        assert!(!store.config_path().exists());
    }
}

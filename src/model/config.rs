use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use toml::{Table, Value};

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub general: GeneralConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    pub notes_dir: String,
}

#[derive(Debug, Deserialize)]
pub struct GeneralConfig {
    pub frame_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    pub filter: String,
}

const DEFAULTS: &str = include_str!("../../config/default.toml");

impl AppConfig {
    /// Load configuration with layering: defaults → user config.
    pub fn load() -> Result<Self> {
        let mut config = Self::defaults()?;

        if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "pocketnote") {
            let config_path = proj_dirs.config_dir().join("config.toml");
            if config_path.exists() {
                let user_str = fs::read_to_string(&config_path)?;
                config = Self::layered(&user_str)?;
            }
        }

        if config.storage.notes_dir.starts_with('~') {
            let home = dirs_home().ok_or_else(|| anyhow!("cannot determine home directory"))?;
            config.storage.notes_dir = expand_home(&config.storage.notes_dir, &home);
        }

        Ok(config)
    }

    pub fn defaults() -> Result<Self> {
        Ok(toml::from_str(DEFAULTS)?)
    }

    /// Defaults with `user` laid over them key by key.
    pub fn layered(user: &str) -> Result<Self> {
        let mut table: Table = toml::from_str(DEFAULTS)?;
        merge_tables(&mut table, toml::from_str(user)?);
        Ok(Value::Table(table).try_into()?)
    }

    pub fn notes_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.notes_dir)
    }

    /// Input poll interval per frame, never below one millisecond.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.general.frame_ms.max(1))
    }
}

fn merge_tables(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        if let Value::Table(section) = value {
            if let Some(Value::Table(base_section)) = base.get_mut(&key) {
                merge_tables(base_section, section);
                continue;
            }
            base.insert(key, Value::Table(section));
        } else {
            base.insert(key, value);
        }
    }
}

fn expand_home(path: &str, home: &std::path::Path) -> String {
    path.replacen('~', &home.to_string_lossy(), 1)
}

fn dirs_home() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.home_dir().to_path_buf())
}

//! Startup configuration read from `availability.toml`.
//!
//! The file is looked up at `$AVAILABILITY_GRID_CONFIG` if set, otherwise in
//! the platform config directory. A missing file means defaults: database in
//! the platform data directory and nobody signed in.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::slot::OwnerId;
use crate::services::auth::StaticAuth;

pub const CONFIG_ENV_VAR: &str = "AVAILABILITY_GRID_CONFIG";
const CONFIG_FILE: &str = "availability.toml";
const DATABASE_FILE: &str = "availability.db";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite file; defaults to the platform data directory
    pub database_path: Option<PathBuf>,
    /// Owner whose availability is edited; unset means signed out
    pub owner_id: Option<String>,
}

impl AppConfig {
    /// Load from the configured location, falling back to defaults when no
    /// file exists.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                log::info!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Write the config as TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config {}", path.display()))
    }

    /// Where `load` looks for the config file.
    pub fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Database location, falling back to the platform data directory or
    /// the working directory.
    pub fn resolve_database_path(&self) -> PathBuf {
        if let Some(path) = &self.database_path {
            return path.clone();
        }
        match project_dirs() {
            Some(dirs) => dirs.data_dir().join(DATABASE_FILE),
            None => PathBuf::from(DATABASE_FILE),
        }
    }

    /// Auth collaborator for the configured owner.
    pub fn auth(&self) -> StaticAuth {
        let owner = self
            .owner_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(OwnerId::new);
        StaticAuth::new(owner)
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "KenBoyle", "AvailabilityGrid")
}

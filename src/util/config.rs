//! Configuration file support for slipway.
//!
//! Two locations are consulted:
//! - Global: `~/.slipway/config.toml` - user-wide defaults
//! - Project: `.slipway/config.toml` - project-specific overrides
//!
//! Project config takes precedence over global config. The only settings
//! are the staging root and the staged project name; everything else is
//! resolved from the host at run time.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::staging::{StagingLayout, DEFAULT_PROJECT};

/// slipway configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Staging settings
    pub stage: StageSettings,
}

/// Staging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StageSettings {
    /// Root of the staging tree
    pub dir: Option<PathBuf>,

    /// Project name spliced into staged include/pymod paths
    pub project: String,
}

impl Default for StageSettings {
    fn default() -> Self {
        StageSettings {
            dir: None,
            project: DEFAULT_PROJECT.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory: {}", parent.display())
            })?;
        }

        let contents =
            toml::to_string_pretty(self).with_context(|| "failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write config: {}", path.display()))?;

        Ok(())
    }

    /// The staging layout configured here, if a root was set.
    pub fn staging_layout(&self) -> Option<StagingLayout> {
        self.stage.dir.as_ref().map(|dir| {
            StagingLayout::new(dir.clone()).with_project(self.stage.project.clone())
        })
    }
}

/// Path to the project config file under the given directory.
pub fn project_config_path(dir: &Path) -> PathBuf {
    dir.join(".slipway").join("config.toml")
}

/// Path to the global config file, if a home directory exists.
pub fn global_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".slipway").join("config.toml"))
}

/// Load config with project settings overriding global ones.
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let global = Config::load_or_default(global_path);

    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        Config {
            stage: StageSettings {
                dir: project.stage.dir.or(global.stage.dir),
                project: project.stage.project,
            },
        }
    } else {
        global
    }
}

//! Command implementations

pub mod completions;
pub mod detect;
pub mod doctor;
pub mod flags;
pub mod stage;

use std::path::PathBuf;

use slipway::util::config::{global_config_path, load_config, project_config_path, Config};

/// Load the effective configuration (project over global).
pub fn effective_config() -> Config {
    let cwd = std::env::current_dir().unwrap_or_default();
    let project = project_config_path(&cwd);
    let global = global_config_path().unwrap_or_else(|| PathBuf::from(".slipway/config.toml"));
    load_config(&global, &project)
}

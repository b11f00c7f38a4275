use crate::error::{NextverError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Represents the complete configuration for nextver.
///
/// Carries the conventional-commit keyword tables and behavior defaults.
/// The shipped defaults match the classification rules exactly; a config
/// file only needs to state what differs.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub conventional_commits: ConventionalCommitsConfig,

    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Returns the default list of patch-level commit types.
fn default_patch_types() -> Vec<String> {
    vec![
        "fix".to_string(),
        "docs".to_string(),
        "style".to_string(),
        "refactor".to_string(),
        "perf".to_string(),
        "test".to_string(),
        "chore".to_string(),
    ]
}

/// Returns the default list of minor-level commit types.
fn default_minor_types() -> Vec<String> {
    vec!["feat".to_string(), "feature".to_string()]
}

/// Configuration for conventional commit classification.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ConventionalCommitsConfig {
    #[serde(default = "default_patch_types")]
    pub patch_types: Vec<String>,

    #[serde(default = "default_minor_types")]
    pub minor_types: Vec<String>,
}

impl Default for ConventionalCommitsConfig {
    fn default() -> Self {
        ConventionalCommitsConfig {
            patch_types: default_patch_types(),
            minor_types: default_minor_types(),
        }
    }
}

/// Behavior defaults that flags can override per run.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct BehaviorConfig {
    /// Suppress changelogs when tagging, as if -c were always passed
    #[serde(default)]
    pub no_changelog: bool,
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `nextver.toml` in the current directory
/// 3. `.nextver.toml` in the user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./nextver.toml").exists() {
        fs::read_to_string("./nextver.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".nextver.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| NextverError::config(e.to_string()))
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use ordo_util::errors::OrdoError;

/// Global user configuration loaded from `~/.ordo/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub build: BuildConfig,
}

/// Build settings from `[build]` in global config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Directory (relative to the project root, or absolute) holding
    /// fingerprints and build-order documents.
    #[serde(default = "default_state_dir", rename = "state-dir")]
    pub state_dir: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
        }
    }
}

fn default_state_dir() -> String {
    ".ordo".to_string()
}

impl GlobalConfig {
    /// Load the global configuration from `~/.ordo/config.toml`, or return defaults if the file doesn't exist.
    pub fn load() -> miette::Result<Self> {
        Self::load_from(&Self::default_path())
    }

    /// Load the configuration from an explicit path, or return defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> miette::Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| OrdoError::Generic {
            message: format!("Failed to read global config: {e}"),
        })?;
        toml::from_str(&content).map_err(|e| {
            OrdoError::Generic {
                message: format!("Failed to parse global config: {e}"),
            }
            .into()
        })
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        ordo_util::dirs_path().join("config.toml")
    }

    /// Absolute state directory for a project.
    pub fn state_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.build.state_dir)
    }
}

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::GitHubSettings;

/// Invalid combinations in the config file
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A session sets both a startup command and disables it
    #[error("session {name}: startup_command and disable_startup_command are mutually exclusive")]
    ConflictingStartupCommand { name: String },
}

/// Application settings (from config file)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// tmux session names hidden from the list
    #[serde(default)]
    pub blacklist: Vec<String>,

    /// Defaults applied to sessions that declare none
    #[serde(default)]
    pub default_session: DefaultSessionConfig,

    /// Statically declared sessions
    #[serde(default, rename = "session")]
    pub sessions: Vec<SessionConfig>,

    /// GitHub repository discovery
    #[serde(default)]
    pub github: GitHubSettings,
}

/// Defaults for sessions created by sesh
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultSessionConfig {
    #[serde(default)]
    pub startup_command: Option<String>,
    #[serde(default)]
    pub preview_command: Option<String>,
}

/// A `[[session]]` entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub startup_command: Option<String>,
    #[serde(default)]
    pub preview_command: Option<String>,
    #[serde(default)]
    pub disable_startup_command: bool,
    /// Session is started through tmuxinator
    #[serde(default)]
    pub tmuxinator: bool,
    /// Window names created alongside the first window
    #[serde(default)]
    pub windows: Vec<String>,
}

impl SessionConfig {
    /// Reject a startup command combined with `disable_startup_command`
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        let has_command = self
            .startup_command
            .as_deref()
            .is_some_and(|c| !c.is_empty());
        if has_command && self.disable_startup_command {
            return Err(ConfigError::ConflictingStartupCommand {
                name: self.name.clone(),
            });
        }
        Ok(())
    }
}

impl Settings {
    /// Load settings from config file or use defaults
    pub fn load(path: Option<&PathBuf>) -> Result<Self> {
        // Try custom path first
        if let Some(p) = path {
            if p.exists() {
                return Self::load_file(p);
            }
        }

        // Try default config locations
        let default_paths = [
            dirs::config_dir().map(|p| p.join("sesh/sesh.toml")),
            dirs::home_dir().map(|p| p.join(".config/sesh/sesh.toml")),
        ];

        for path in default_paths.iter().flatten() {
            if path.exists() {
                return Self::load_file(path);
            }
        }

        // Return defaults if no config file found
        Ok(Self::default())
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

//! Config struct and loading logic.
//!
//! Priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables
//! 3. `.licgen.toml` in the working directory
//! 4. `~/.config/licgen/config.toml` (global defaults)
//! 5. Built-in defaults

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::env::Env;

/// Errors during config loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}", .path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {}", .path.display())]
    ParseFile {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub signing: SigningConfig,
    pub display: DisplayConfig,
}

/// Signing key configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningConfig {
    /// Path to the PEM-encoded RSA private key.
    ///
    /// Relative paths in a config file resolve against that file's directory.
    pub key: Option<PathBuf>,
}

/// Display block configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Render timestamps in UTC rather than the machine's local zone.
    pub utc: bool,
}

impl Config {
    /// Load configuration with proper layering.
    ///
    /// Reads from global config, the working-directory config, then applies
    /// environment variable overrides. CLI flags are applied by the caller.
    pub fn load(work_dir: Option<&Path>, env: &Env) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        // Layer 4: global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                let global = Self::load_file(&global_path)?;
                config.merge(global);
            }
        }

        // Layer 3: working-directory config
        if let Some(dir) = work_dir {
            let local_path = dir.join(crate::constants::CONFIG_FILENAME);
            if local_path.exists() {
                let local = Self::load_file(&local_path)?;
                config.merge(local);
            }
        }

        // Layer 2: environment variables
        config.apply_env_vars(env);

        tracing::debug!(
            key = ?config.signing.key,
            utc = config.display.utc,
            "resolved configuration"
        );

        Ok(config)
    }

    /// Load a config from a specific file.
    fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        if let (Some(key), Some(parent)) = (config.signing.key.as_mut(), path.parent()) {
            if key.is_relative() {
                *key = parent.join(&*key);
            }
        }

        Ok(config)
    }

    /// Get the global config file path.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(crate::constants::CONFIG_DIR).join("config.toml"))
    }

    /// Merge another config into this one (other takes precedence for non-default values).
    fn merge(&mut self, other: Config) {
        if other.signing.key.is_some() {
            self.signing.key = other.signing.key;
        }
        if other.display.utc {
            self.display.utc = true;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_vars(&mut self, env: &Env) {
        if let Some(key) = env.path(crate::constants::ENV_KEY) {
            self.signing.key = Some(key);
        }

        match env.flag(crate::constants::ENV_DISPLAY_UTC) {
            Ok(Some(utc)) => self.display.utc = utc,
            Ok(None) => {}
            Err(val) => eprintln!(
                "Warning: ignoring invalid {} value: {val}",
                crate::constants::ENV_DISPLAY_UTC
            ),
        }
    }
}

//! Configuration file loading and bootstrap.
//!
//! # Location
//!
//! Resolved in order:
//! 1. An explicit path (`--config`)
//! 2. `$GIT_AICOMMIT_CONFIG` if set
//! 3. `~/.config/git-aicommit/config.toml`
//!
//! When the resolved file does not exist, a commented default file is written
//! there first and then loaded.
//!
//! # Example
//!
//! ```toml
//! [deepseek]
//! api_key = "sk-..."
//! temperature = 0.7
//! prompt = """
//! Write a one-line commit message.
//! """
//! ```

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::ConfigError;

/// Environment variable overriding the config file path.
pub const CONFIG_ENV_VAR: &str = "GIT_AICOMMIT_CONFIG";

/// Environment variable overriding the API key from the file.
pub const API_KEY_ENV_VAR: &str = "DEEPSEEK_API_KEY";

/// Accepted temperature range.
const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;

/// Contents written when no config file exists yet.
pub const DEFAULT_CONFIG: &str = r#"
# Git-Aicommit Configuration File
# This file contains configuration settings for the git-aicommit CLI tool

[deepseek]
# DeepSeek API key for AI-powered commit message generation
# Get your API key from: https://platform.deepseek.com/
api_key = ""

# Temperature setting for AI text generation (0.0 to 2.0)
# Lower values (e.g., 0.1) make output more focused and deterministic
# Higher values (e.g., 1.5) make output more random and creative
# Default: 0.7 provides a good balance
temperature = 0.7

# Custom prompt for commit message generation (optional)
# Leave empty to use the default prompt
# The prompt should instruct the AI how to format commit messages
prompt = """
You are an AI commit message assistant.

Please generate a commit message with the following format:
1. Title (one short sentence, 50-72 characters max).
2. A clear bullet-point list of changes (start each line with "- ").
3. Each line, including bullets, should be under 100 characters.
4. Keep it concise, consistent, and professional.

Example:

Improve error handling in user authentication

- Add detailed error messages for login failures
- Handle timeout errors gracefully
- Refactor error propagation logic for clarity
"""
"#;

/// Top-level config file schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub deepseek: DeepSeekConfig,
}

/// `[deepseek]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeepSeekConfig {
    #[serde(default)]
    pub api_key: String,
    pub temperature: Option<f32>,
    pub prompt: Option<String>,
}

/// A parsed config together with where it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: Config,
    pub path: PathBuf,
    /// Whether the default file was written during this load.
    pub created: bool,
}

impl LoadedConfig {
    /// The API key, preferring `$DEEPSEEK_API_KEY` over the file.
    ///
    /// Returns `ConfigError::MissingApiKey` if neither provides a non-empty key.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        if let Ok(key) = env::var(API_KEY_ENV_VAR) {
            let key = key.trim();
            if !key.is_empty() {
                debug!("Using API key from {}", API_KEY_ENV_VAR);
                return Ok(key.to_string());
            }
        }

        let key = self.config.deepseek.api_key.trim();
        if key.is_empty() {
            return Err(ConfigError::MissingApiKey {
                path: self.path.clone(),
            });
        }
        Ok(key.to_string())
    }

    pub fn temperature(&self) -> Option<f32> {
        self.config.deepseek.temperature
    }

    /// Custom instructions, if set to something other than blank.
    pub fn prompt(&self) -> Option<&str> {
        self.config
            .deepseek
            .prompt
            .as_deref()
            .filter(|p| !p.trim().is_empty())
    }
}

impl Config {
    /// Parse a config from TOML text.
    pub fn from_toml(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(t) = self.deepseek.temperature {
            if !TEMPERATURE_RANGE.contains(&t) {
                return Err(ConfigError::InvalidValue(format!(
                    "deepseek.temperature must be between {} and {}, got {}",
                    TEMPERATURE_RANGE.start(),
                    TEMPERATURE_RANGE.end(),
                    t
                )));
            }
        }
        Ok(())
    }

    /// Load the config, writing the default file first if it is missing.
    pub fn load(explicit: Option<&Path>) -> Result<LoadedConfig, ConfigError> {
        let path = resolve_path(explicit)?;

        let created = if path.exists() {
            false
        } else {
            write_default(&path)?;
            info!("Created default config at {}", path.display());
            true
        };

        let contents = fs::read_to_string(&path).map_err(|e| ConfigError::Read {
            path: path.clone(),
            source: e,
        })?;
        let config = Self::from_toml(&contents, &path)?;

        debug!("Loaded config from {}", path.display());
        Ok(LoadedConfig {
            config,
            path,
            created,
        })
    }
}

/// Canonical config path: `~/.config/git-aicommit/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".config").join("git-aicommit").join("config.toml"))
}

fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    match env::var(CONFIG_ENV_VAR) {
        Ok(path) if !path.is_empty() => Ok(PathBuf::from(path)),
        _ => default_config_path(),
    }
}

/// Write [`DEFAULT_CONFIG`] atomically, creating parent directories.
pub fn write_default(path: &Path) -> Result<(), ConfigError> {
    let write_err = |source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_err)?;

    let mut file = NamedTempFile::new_in(dir).map_err(write_err)?;
    file.write_all(DEFAULT_CONFIG.as_bytes()).map_err(write_err)?;
    file.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

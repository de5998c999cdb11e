use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory name used under the platform config/data directories
pub const APP_NAME: &str = "lavender-lab";

pub const DEFAULT_MODEL_NAME: &str = "gemini-1.5-flash-latest";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Errors raised while reading or writing configuration files
#[derive(Error, Debug)]
pub enum ConfigFileError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Configuration struct for Gemini API
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub api_base_url: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: Some(DEFAULT_MODEL_NAME.to_string()),
            api_base_url: Some(DEFAULT_API_BASE_URL.to_string()),
        }
    }
}

impl GeminiConfig {
    /// Merges this config with another config, preferring values from the other config if present
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            api_key: other.api_key.clone().or_else(|| self.api_key.clone()),
            model_name: other.model_name.clone().or_else(|| self.model_name.clone()),
            api_base_url: other
                .api_base_url
                .clone()
                .or_else(|| self.api_base_url.clone()),
        }
    }

    /// The API key, ignoring blank values
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn model_name(&self) -> &str {
        self.model_name.as_deref().unwrap_or(DEFAULT_MODEL_NAME)
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
    }
}

/// Loads a TOML file if it exists, otherwise returns the type's default
pub fn load_toml_or_default<T>(path: &Path) -> Result<T, ConfigFileError>
where
    T: for<'de> Deserialize<'de> + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(toml::from_str(&content)?)
}

/// Helper function to get default config directory
pub fn get_default_config_dir() -> Result<PathBuf, ConfigFileError> {
    let config_dir = dirs::config_dir().ok_or(ConfigFileError::NoConfigDir)?;
    Ok(config_dir.join(APP_NAME))
}

/// Helper function to get a config file path inside the default config directory
pub fn get_default_config_file(file_name: &str) -> Result<PathBuf, ConfigFileError> {
    Ok(get_default_config_dir()?.join(file_name))
}

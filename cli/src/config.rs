use lavender_core::config::{get_default_config_file, load_toml_or_default, ConfigFileError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "cli.toml";
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:5000";

/// Client-side settings, read from `cli.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CliConfig {
    pub gateway_url: String,
    /// Storage file for saved ideas; the platform data dir when unset
    pub history_path: Option<PathBuf>,
    /// Bearer token sent to the gateway
    pub token: Option<String>,
    pub log_level: Option<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            history_path: None,
            token: None,
            log_level: None,
        }
    }
}

impl CliConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigFileError> {
        load_toml_or_default(path)
    }

    pub fn load_from_default() -> Result<Self, ConfigFileError> {
        Self::load_from_file(&get_default_config_file(CONFIG_FILE_NAME)?)
    }
}

use lavender_core::config::{get_default_config_file, load_toml_or_default, ConfigFileError};
use lavender_core::GeminiConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "gateway.toml";

/// Environment variable holding the downstream API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Environment variable holding the bearer-token signing secret
pub const JWT_SECRET_ENV: &str = "LAVENDER_JWT_SECRET";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub http_addr: SocketAddr,
    pub gemini: GeminiConfig,
    pub auth: AuthConfig,
}

/// Bearer-token check settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// Reject `/generate` calls without a valid token
    pub enabled: bool,
    /// HS256 secret shared with the token issuer
    pub jwt_secret: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            http_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            gemini: GeminiConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file; a missing file yields the defaults
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigFileError> {
        let loaded: AppConfig = load_toml_or_default(path)?;
        // Fill fields the file left out with the built-in defaults
        let gemini = GeminiConfig::default().merge(&loaded.gemini);
        Ok(AppConfig { gemini, ..loaded })
    }

    /// Load `gateway.toml` from the default config directory
    pub fn load_from_default() -> Result<Self, ConfigFileError> {
        let path = get_default_config_file(CONFIG_FILE_NAME)?;
        Self::load_from_file(&path)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(api_key) = lookup(API_KEY_ENV).filter(|v| !v.trim().is_empty()) {
            self.gemini.api_key = Some(api_key);
        }
        if let Some(secret) = lookup(JWT_SECRET_ENV).filter(|v| !v.is_empty()) {
            self.auth.jwt_secret = Some(secret);
        }
    }
}

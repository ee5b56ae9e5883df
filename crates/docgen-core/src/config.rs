use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::paths;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

const CONFIG_FILE_PATH: &str = "docgen.toml";

/// Process configuration, resolved once at startup and shared read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub temperature: f32,
    pub policy_path: PathBuf,
    pub request_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            policy_path: paths::default_policy_dir(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Load `~/.docgen/config.json`, else `./docgen.toml`, then apply
    /// environment overrides. Unreadable files fall back to defaults.
    pub fn load() -> Self {
        let mut config = None;

        let json_path = paths::config_json_path();
        if json_path.exists() {
            match Self::from_json_file(&json_path) {
                Ok(file_config) => config = Some(file_config),
                Err(e) => log::warn!("Ignoring {}: {}", json_path.display(), e),
            }
        }

        if config.is_none() && Path::new(CONFIG_FILE_PATH).exists() {
            match Self::from_toml_file(Path::new(CONFIG_FILE_PATH)) {
                Ok(file_config) => config = Some(file_config),
                Err(e) => log::warn!("Ignoring {}: {}", CONFIG_FILE_PATH, e),
            }
        }

        let mut config = config.unwrap_or_default();
        if config.request_timeout_secs == 0 {
            log::warn!(
                "Ignoring request_timeout_secs = 0 from config file; using {}s",
                DEFAULT_REQUEST_TIMEOUT_SECS
            );
            config.request_timeout_secs = DEFAULT_REQUEST_TIMEOUT_SECS;
        }
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = paths::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = paths::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Apply overrides from an environment lookup.
    pub fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(api_key) = env("OPENAI_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(api_key);
        }
        if let Some(api_base) = env("OPENAI_API_BASE") {
            self.api_base = api_base;
        }
        if let Some(model) = env("OPENAI_MODEL") {
            self.model = model;
        }
        if let Some(raw) = env("OPENAI_TEMPERATURE") {
            match raw.trim().parse::<f32>() {
                Ok(value) => self.temperature = value,
                Err(_) => log::warn!("Ignoring invalid OPENAI_TEMPERATURE: {:?}", raw),
            }
        }
        if let Some(policy_path) = env("DOCGEN_POLICY_PATH") {
            self.policy_path = PathBuf::from(policy_path);
        }
        if let Some(raw) = env("DOCGEN_REQUEST_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(value) if value > 0 => self.request_timeout_secs = value,
                _ => log::warn!("Ignoring invalid DOCGEN_REQUEST_TIMEOUT_SECS: {:?}", raw),
            }
        }
    }
}

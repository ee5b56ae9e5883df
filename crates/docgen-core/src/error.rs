use std::path::PathBuf;

use thiserror::Error;

/// Raised when a prompt template cannot be rendered from a request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubstitutionError {
    #[error("Missing template key: {0}")]
    MissingKey(String),

    #[error("Malformed template at byte {position}: {reason}")]
    Malformed { position: usize, reason: String },
}

/// A policy rule crashed while evaluating. A rule *rejecting* text is not an
/// error; it produces a refusal verdict instead.
#[derive(Error, Debug, Clone)]
#[error("Policy rule '{rule}' failed: {message}")]
pub struct PolicyError {
    pub rule: String,
    pub message: String,
}

impl PolicyError {
    pub fn new(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
        }
    }
}

/// Startup-fatal configuration problems.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Policy configuration not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid rule #{index} ({name}): {reason}")]
    InvalidRule {
        index: usize,
        name: String,
        reason: String,
    },
}

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Docgen configuration directory (~/.docgen)
pub fn docgen_dir() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir)
        .join(".docgen")
}

pub fn config_json_path() -> PathBuf {
    docgen_dir().join("config.json")
}

/// Default location of the policy configuration directory.
pub fn default_policy_dir() -> PathBuf {
    docgen_dir().join("guardrails")
}

/// Resolve a policy location to the YAML file it names. Directories are
/// searched for `config.yml`, then `config.yaml`.
pub fn resolve_policy_file(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    if path.is_dir() {
        for name in ["config.yml", "config.yaml"] {
            let candidate = path.join(name);
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }
    Err(ConfigError::NotFound(path.to_path_buf()))
}

pub fn read_to_string(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::paths;

pub const DEFAULT_REFUSAL_MESSAGE: &str = "I'm sorry, I can't respond to that.";
pub const MASK_TOKEN: &str = "[MASKED]";

/// What a rule does when it matches.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    /// Refuse with the direction's refusal message.
    #[default]
    Block,
    /// Replace matched spans with [`MASK_TOKEN`] and continue.
    Mask,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatcherConfig {
    /// Any of the listed substrings.
    Keywords {
        patterns: Vec<String>,
        #[serde(default)]
        case_sensitive: bool,
    },
    Regex {
        pattern: String,
    },
    /// Matches (violates) when the trimmed text is shorter than `value` chars.
    MinLength {
        value: usize,
    },
    /// Matches (violates) when the trimmed text is longer than `value` chars.
    MaxLength {
        value: usize,
    },
}

impl MatcherConfig {
    fn kind(&self) -> &'static str {
        match self {
            MatcherConfig::Keywords { .. } => "keywords",
            MatcherConfig::Regex { .. } => "regex",
            MatcherConfig::MinLength { .. } => "min_length",
            MatcherConfig::MaxLength { .. } => "max_length",
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(
            self,
            MatcherConfig::Keywords { .. } | MatcherConfig::Regex { .. }
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RuleConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub action: RuleAction,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl RuleConfig {
    pub fn new(matcher: MatcherConfig) -> Self {
        Self {
            name: None,
            matcher,
            action: RuleAction::Block,
            enabled: true,
        }
    }

    pub fn keywords<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(MatcherConfig::Keywords {
            patterns: patterns.into_iter().map(Into::into).collect(),
            case_sensitive: false,
        })
    }

    pub fn regex(pattern: impl Into<String>) -> Self {
        Self::new(MatcherConfig::Regex {
            pattern: pattern.into(),
        })
    }

    pub fn min_length(value: usize) -> Self {
        Self::new(MatcherConfig::MinLength { value })
    }

    pub fn max_length(value: usize) -> Self {
        Self::new(MatcherConfig::MaxLength { value })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn masking(mut self) -> Self {
        self.action = RuleAction::Mask;
        self
    }

    /// Display name; falls back to the matcher kind and position.
    pub fn display_name(&self, index: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("{}#{}", self.matcher.kind(), index))
    }
}

/// Rules and refusal text for one direction (input or output).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DirectionConfig {
    #[serde(default)]
    pub refusal_message: Option<String>,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

/// Policy configuration, loaded once at startup and never reloaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PolicyConfig {
    #[serde(default = "default_refusal")]
    pub refusal_message: String,
    #[serde(default)]
    pub input: DirectionConfig,
    #[serde(default)]
    pub output: DirectionConfig,
}

fn default_refusal() -> String {
    DEFAULT_REFUSAL_MESSAGE.to_string()
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            refusal_message: default_refusal(),
            input: DirectionConfig::default(),
            output: DirectionConfig::default(),
        }
    }
}

impl PolicyConfig {
    /// Load from a YAML file, or a directory holding `config.yml`.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let file = paths::resolve_policy_file(path)?;
        log::info!("Loading policy configuration from {}", file.display());
        let content = paths::read_to_string(&file)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        // An empty document is an empty policy, not a parse error.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn input_refusal(&self) -> &str {
        self.input
            .refusal_message
            .as_deref()
            .unwrap_or(&self.refusal_message)
    }

    pub fn output_refusal(&self) -> &str {
        self.output
            .refusal_message
            .as_deref()
            .unwrap_or(&self.refusal_message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
refusal_message: "Cannot help with that."
input:
  rules:
    - name: not-empty
      type: min_length
      value: 1
    - name: off-topic
      type: keywords
      patterns: ["password", "exploit"]
    - type: regex
      pattern: "sk-[A-Za-z0-9]+"
      action: mask
output:
  refusal_message: "Output withheld."
  rules:
    - type: keywords
      patterns: ["SECRET"]
      case_sensitive: true
      enabled: false
"#;

    #[test]
    fn parses_full_document() {
        let config = PolicyConfig::from_yaml_str(SAMPLE).unwrap();

        assert_eq!(config.refusal_message, "Cannot help with that.");
        assert_eq!(config.input.rules.len(), 3);
        assert_eq!(config.input.rules[0].matcher, MatcherConfig::MinLength { value: 1 });
        assert_eq!(config.input.rules[1].action, RuleAction::Block);
        assert_eq!(config.input.rules[2].action, RuleAction::Mask);
        assert!(!config.output.rules[0].enabled);
    }

    #[test]
    fn refusal_falls_back_to_top_level() {
        let config = PolicyConfig::from_yaml_str(SAMPLE).unwrap();
        assert_eq!(config.input_refusal(), "Cannot help with that.");
        assert_eq!(config.output_refusal(), "Output withheld.");
    }

    #[test]
    fn empty_document_is_default_policy() {
        let config = PolicyConfig::from_yaml_str("   \n").unwrap();
        assert_eq!(config, PolicyConfig::default());
        assert_eq!(config.input_refusal(), DEFAULT_REFUSAL_MESSAGE);
    }

    #[test]
    fn unknown_rule_type_is_parse_error() {
        let err = PolicyConfig::from_yaml_str(
            "input:\n  rules:\n    - type: telepathy\n",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn missing_location_is_not_found() {
        let err = PolicyConfig::from_path(Path::new("/definitely/not/here")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn loads_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.yml"), SAMPLE).unwrap();

        let config = PolicyConfig::from_path(dir.path()).unwrap();
        assert_eq!(config.input.rules.len(), 3);
    }

    #[test]
    fn display_name_defaults_to_kind_and_index() {
        assert_eq!(RuleConfig::max_length(10).display_name(2), "max_length#2");
        assert_eq!(RuleConfig::regex("x").named("keys").display_name(0), "keys");
    }
}

use regex::{Regex, RegexBuilder};

use super::config::{MatcherConfig, RuleAction, RuleConfig, MASK_TOKEN};
use crate::error::ConfigError;

const REGEX_SIZE_LIMIT: usize = 1 << 20;

#[derive(Debug, Clone)]
enum CompiledMatcher {
    Pattern(Regex),
    MinLength(usize),
    MaxLength(usize),
}

/// Outcome of a single rule against a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    Pass,
    Violation,
    Masked(String),
}

/// A rule with its pattern compiled, ready for evaluation.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    name: String,
    action: RuleAction,
    matcher: CompiledMatcher,
}

impl CompiledRule {
    pub fn compile(config: &RuleConfig, index: usize) -> Result<Self, ConfigError> {
        let name = config.display_name(index);
        let invalid = |reason: String| ConfigError::InvalidRule {
            index,
            name: name.clone(),
            reason,
        };

        if config.action == RuleAction::Mask && !config.matcher.is_pattern() {
            return Err(invalid(
                "mask action requires a keywords or regex rule".to_string(),
            ));
        }

        let matcher = match &config.matcher {
            MatcherConfig::Keywords {
                patterns,
                case_sensitive,
            } => {
                if patterns.is_empty() || patterns.iter().any(|p| p.is_empty()) {
                    return Err(invalid("keywords must be non-empty".to_string()));
                }
                let alternation = patterns
                    .iter()
                    .map(|p| regex::escape(p))
                    .collect::<Vec<_>>()
                    .join("|");
                CompiledMatcher::Pattern(
                    build_regex(&alternation, !case_sensitive)
                        .map_err(|e| invalid(e.to_string()))?,
                )
            }
            MatcherConfig::Regex { pattern } => CompiledMatcher::Pattern(
                build_regex(pattern, false)
                    .map_err(|e| invalid(format!("invalid regex '{}': {}", pattern, e)))?,
            ),
            MatcherConfig::MinLength { value } => CompiledMatcher::MinLength(*value),
            MatcherConfig::MaxLength { value } => CompiledMatcher::MaxLength(*value),
        };

        Ok(Self {
            name,
            action: config.action,
            matcher,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn action(&self) -> RuleAction {
        self.action
    }

    pub fn evaluate(&self, text: &str) -> RuleOutcome {
        match &self.matcher {
            CompiledMatcher::Pattern(regex) => {
                if !regex.is_match(text) {
                    return RuleOutcome::Pass;
                }
                match self.action {
                    RuleAction::Block => RuleOutcome::Violation,
                    RuleAction::Mask => {
                        RuleOutcome::Masked(regex.replace_all(text, MASK_TOKEN).into_owned())
                    }
                }
            }
            CompiledMatcher::MinLength(min) => {
                if text.trim().chars().count() < *min {
                    RuleOutcome::Violation
                } else {
                    RuleOutcome::Pass
                }
            }
            CompiledMatcher::MaxLength(max) => {
                if text.trim().chars().count() > *max {
                    RuleOutcome::Violation
                } else {
                    RuleOutcome::Pass
                }
            }
        }
    }
}

fn build_regex(pattern: &str, case_insensitive: bool) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
}

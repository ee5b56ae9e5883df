use std::path::Path;

use async_trait::async_trait;

use super::config::{PolicyConfig, RuleConfig};
use super::rules::{CompiledRule, RuleOutcome};
use super::{PolicyEngine, Verdict};
use crate::error::{ConfigError, PolicyError};
use crate::request::Request;

/// Rule-based [`PolicyEngine`] built from a [`PolicyConfig`].
///
/// Rules run in configuration order. Masking rules rewrite the text seen by
/// later rules; the first blocking rule that matches ends evaluation.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    input_rules: Vec<CompiledRule>,
    output_rules: Vec<CompiledRule>,
    input_refusal: String,
    output_refusal: String,
}

impl RuleEngine {
    pub fn from_config(config: &PolicyConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            input_rules: compile_all(&config.input.rules)?,
            output_rules: compile_all(&config.output.rules)?,
            input_refusal: config.input_refusal().to_string(),
            output_refusal: config.output_refusal().to_string(),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let config = PolicyConfig::from_path(path)?;
        let engine = Self::from_config(&config)?;
        log::info!(
            "Policy loaded: {} input rule(s), {} output rule(s)",
            engine.input_rules.len(),
            engine.output_rules.len()
        );
        Ok(engine)
    }

    /// An engine with no rules; accepts everything.
    pub fn permissive() -> Self {
        Self {
            input_rules: Vec::new(),
            output_rules: Vec::new(),
            input_refusal: PolicyConfig::default().input_refusal().to_string(),
            output_refusal: PolicyConfig::default().output_refusal().to_string(),
        }
    }

    pub fn input_rules(&self) -> &[CompiledRule] {
        &self.input_rules
    }

    pub fn output_rules(&self) -> &[CompiledRule] {
        &self.output_rules
    }

    fn evaluate(rules: &[CompiledRule], text: &str, refusal: &str) -> Verdict {
        let mut current: Option<String> = None;

        for rule in rules {
            let subject = current.as_deref().unwrap_or(text);
            match rule.evaluate(subject) {
                RuleOutcome::Pass => {}
                RuleOutcome::Masked(masked) => {
                    log::debug!("Rule '{}' masked content", rule.name());
                    current = Some(masked);
                }
                RuleOutcome::Violation => {
                    log::warn!("Rule '{}' refused content", rule.name());
                    return Verdict::Refuse {
                        rule: rule.name().to_string(),
                        message: refusal.to_string(),
                    };
                }
            }
        }

        match current {
            Some(rewritten) => Verdict::Rewrite(rewritten),
            None => Verdict::Allow,
        }
    }
}

fn compile_all(rules: &[RuleConfig]) -> Result<Vec<CompiledRule>, ConfigError> {
    rules
        .iter()
        .enumerate()
        .filter(|(_, rule)| rule.enabled)
        .map(|(index, rule)| CompiledRule::compile(rule, index))
        .collect()
}

#[async_trait]
impl PolicyEngine for RuleEngine {
    async fn check_input(&self, request: &Request) -> Result<Verdict, PolicyError> {
        let Some(input) = request.input() else {
            // Nothing to inspect; the template stage reports the missing key.
            log::debug!("Request has no input field; skipping input rules");
            return Ok(Verdict::Allow);
        };
        Ok(Self::evaluate(&self.input_rules, input, &self.input_refusal))
    }

    async fn check_output(&self, output: &str) -> Result<Verdict, PolicyError> {
        Ok(Self::evaluate(&self.output_rules, output, &self.output_refusal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::config::DirectionConfig;

    fn engine(input: Vec<RuleConfig>, output: Vec<RuleConfig>) -> RuleEngine {
        RuleEngine::from_config(&PolicyConfig {
            refusal_message: "refused".to_string(),
            input: DirectionConfig {
                refusal_message: None,
                rules: input,
            },
            output: DirectionConfig {
                refusal_message: None,
                rules: output,
            },
        })
        .unwrap()
    }

    #[tokio::test]
    async fn permissive_accepts_empty_input() {
        let verdict = RuleEngine::permissive()
            .check_input(&Request::new(""))
            .await
            .unwrap();
        assert_eq!(verdict, Verdict::Allow);
    }

    #[tokio::test]
    async fn blocking_rule_refuses_with_configured_text() {
        let engine = engine(vec![RuleConfig::keywords(["exploit"]).named("topics")], vec![]);
        let verdict = engine
            .check_input(&Request::new("write an exploit"))
            .await
            .unwrap();
        assert_eq!(
            verdict,
            Verdict::Refuse {
                rule: "topics".to_string(),
                message: "refused".to_string()
            }
        );
    }

    #[tokio::test]
    async fn mask_then_block_sees_masked_text() {
        let engine = engine(
            vec![
                RuleConfig::regex("sk-[a-z0-9]+").masking(),
                RuleConfig::keywords(["sk-"]),
            ],
            vec![],
        );
        let verdict = engine
            .check_input(&Request::new("token sk-abc"))
            .await
            .unwrap();
        assert_eq!(verdict, Verdict::Rewrite("token [MASKED]".to_string()));
    }

    #[tokio::test]
    async fn first_blocking_rule_wins() {
        let engine = engine(
            vec![
                RuleConfig::max_length(3).named("short"),
                RuleConfig::keywords(["long"]).named("words"),
            ],
            vec![],
        );
        let verdict = engine.check_input(&Request::new("long text")).await.unwrap();
        assert!(matches!(verdict, Verdict::Refuse { ref rule, .. } if rule == "short"));
    }

    #[tokio::test]
    async fn disabled_rules_are_skipped() {
        let mut rule = RuleConfig::keywords(["secret"]);
        rule.enabled = false;
        let engine = engine(vec![], vec![rule]);
        assert!(engine.output_rules().is_empty());
        assert_eq!(
            engine.check_output("secret").await.unwrap(),
            Verdict::Allow
        );
    }

    #[tokio::test]
    async fn output_rule_flags_secret() {
        let mut rule = RuleConfig::keywords(["SECRET"]);
        if let crate::policy::MatcherConfig::Keywords { case_sensitive, .. } = &mut rule.matcher {
            *case_sensitive = true;
        }
        let engine = engine(vec![], vec![rule]);

        assert!(engine
            .check_output("leaked SECRET token")
            .await
            .unwrap()
            .is_refusal());
        assert_eq!(engine.check_output("a secret").await.unwrap(), Verdict::Allow);
    }

    #[tokio::test]
    async fn missing_input_is_left_to_template_stage() {
        let engine = engine(vec![RuleConfig::min_length(1)], vec![]);
        let request = Request::default().with_field("code", "x");
        assert_eq!(engine.check_input(&request).await.unwrap(), Verdict::Allow);
    }
}

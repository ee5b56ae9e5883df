//! Policy (guardrails) configuration and evaluation.
//!
//! A [`PolicyEngine`] inspects the request before generation and the
//! generated text afterwards. The default engine, [`RuleEngine`], evaluates
//! rules loaded from a YAML [`PolicyConfig`].

pub mod config;
pub mod engine;
pub mod rules;

use async_trait::async_trait;

use crate::error::PolicyError;
use crate::request::Request;

pub use config::{
    DirectionConfig, MatcherConfig, PolicyConfig, RuleAction, RuleConfig,
    DEFAULT_REFUSAL_MESSAGE, MASK_TOKEN,
};
pub use engine::RuleEngine;
pub use rules::{CompiledRule, RuleOutcome};

/// Result of checking one side of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// Pass the text through unchanged.
    Allow,
    /// Pass the rewritten text on instead of the original.
    Rewrite(String),
    /// Stop and answer with `message`.
    Refuse { rule: String, message: String },
}

impl Verdict {
    pub fn is_refusal(&self) -> bool {
        matches!(self, Verdict::Refuse { .. })
    }
}

#[async_trait]
pub trait PolicyEngine: Send + Sync {
    /// Evaluate input rules against the request before any generation.
    async fn check_input(&self, request: &Request) -> Result<Verdict, PolicyError>;

    /// Evaluate output rules against generated text.
    async fn check_output(&self, output: &str) -> Result<Verdict, PolicyError>;
}

//! docgen-core - Core types for the documentation generator
//!
//! This crate provides the pieces shared by every other docgen crate:
//! - `request` - the per-call input mapping
//! - `message` - role-tagged messages and the structured prompt
//! - `template` - the prompt template builder
//! - `policy` - policy configuration loading and the rule engine
//! - `config` - process configuration resolved at startup

pub mod config;
pub mod error;
pub mod message;
pub mod paths;
pub mod policy;
pub mod request;
pub mod template;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{ConfigError, PolicyError, SubstitutionError};
pub use message::{Message, Role, StructuredPrompt};
pub use policy::{PolicyConfig, PolicyEngine, RuleEngine, Verdict};
pub use request::{Request, INPUT_KEY};
pub use template::{MessageTemplate, PromptTemplate};

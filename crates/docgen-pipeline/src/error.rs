use docgen_core::{PolicyError, SubstitutionError};
use docgen_llm::{FormatError, GenerationError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Substitution error: {0}")]
    Substitution(#[from] SubstitutionError),

    #[error("Generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),
}

impl PipelineError {
    /// Stable identifier for surfacing the error kind to callers.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Substitution(_) => "substitution",
            PipelineError::Generation(_) => "generation",
            PipelineError::Format(_) => "format",
            PipelineError::Policy(_) => "policy",
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, PipelineError::Generation(GenerationError::Timeout(_)))
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;

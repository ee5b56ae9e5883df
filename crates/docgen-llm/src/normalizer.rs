use thiserror::Error;

use crate::protocol::openai::GenerationResult;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("Generation result could not be parsed: {0}")]
    Unparseable(String),

    #[error("Generation result has no choices")]
    NoChoices,

    #[error("Generation result choice {0} has no text content")]
    MissingContent(u32),
}

/// Extracts the generated text from a [`GenerationResult`], dropping ids,
/// token counts and other metadata. Text is returned as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputNormalizer;

impl OutputNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, result: &GenerationResult) -> Result<String, FormatError> {
        let completion = result
            .parse()
            .map_err(|e| FormatError::Unparseable(e.to_string()))?;
        log::debug!(
            "Normalizing completion {} with {} choice(s)",
            completion.id,
            completion.choices.len()
        );

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(FormatError::NoChoices)?;
        choice
            .message
            .content
            .ok_or(FormatError::MissingContent(choice.index))
    }
}

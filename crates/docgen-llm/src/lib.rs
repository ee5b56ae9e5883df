pub mod normalizer;
pub mod protocol;
pub mod provider;
pub mod providers;

pub use normalizer::{FormatError, OutputNormalizer};
pub use protocol::openai::{ChatCompletion, GenerationResult};
pub use provider::{GenerationError, GenerationProvider};
pub use providers::OpenAIProvider;

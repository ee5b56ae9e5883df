//! Request pipeline for the documentation generator.
//!
//! A request flows through the policy gate's input check, then the prompt
//! template, the generation provider and the output normalizer, and finally
//! back through the gate's output check:
//!
//! ```text
//! Request ─▶ PRE_CHECK ─▶ template ─▶ provider ─▶ normalizer ─▶ POST_CHECK ─▶ Response
//!               │                                                   │
//!               └──────────── refusal ◀─────────────────────────────┘
//! ```

pub mod chain;
pub mod error;
pub mod gate;
pub mod pipeline;
pub mod response;
pub mod runnable;

pub use chain::DocumentationChain;
pub use error::{PipelineError, Result};
pub use gate::{GateState, PolicyGate};
pub use pipeline::{DocumentationPipeline, PipelineBuilder};
pub use response::{Disposition, Response};
pub use runnable::Runnable;

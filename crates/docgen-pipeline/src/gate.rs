use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use docgen_core::{PolicyEngine, Request, Verdict};

use crate::error::Result;
use crate::response::Response;
use crate::runnable::Runnable;

/// Linear states of a gated call. There are no backward transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    PreCheck,
    Invoking,
    PostCheck,
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GateState::PreCheck => "PRE_CHECK",
            GateState::Invoking => "INVOKING",
            GateState::PostCheck => "POST_CHECK",
        };
        f.write_str(name)
    }
}

/// Wraps an inner [`Runnable`] with input and output policy checks.
///
/// A refused input never reaches the inner runnable. Every completed call
/// yields exactly one [`Response`].
pub struct PolicyGate<R: Runnable> {
    engine: Arc<dyn PolicyEngine>,
    inner: R,
}

impl<R: Runnable> PolicyGate<R> {
    pub fn new(engine: Arc<dyn PolicyEngine>, inner: R) -> Self {
        Self { engine, inner }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub async fn run(&self, request: Request) -> Result<Response> {
        log::debug!("Policy gate: {}", GateState::PreCheck);
        let request = match self.engine.check_input(&request).await? {
            Verdict::Allow => request,
            Verdict::Rewrite(input) => {
                log::debug!("Input rewritten by policy");
                request.with_input(input)
            }
            Verdict::Refuse { rule, message } => {
                log::info!("Input refused by rule '{}'", rule);
                return Ok(Response::input_refused(message, rule));
            }
        };

        log::debug!("Policy gate: {}", GateState::Invoking);
        let output = self.inner.invoke(request).await?;

        log::debug!("Policy gate: {}", GateState::PostCheck);
        match self.engine.check_output(&output).await? {
            Verdict::Allow => Ok(Response::generated(output)),
            Verdict::Rewrite(rewritten) => Ok(Response::generated(rewritten)),
            Verdict::Refuse { rule, message } => {
                log::info!("Output refused by rule '{}'", rule);
                Ok(Response::output_refused(message, rule))
            }
        }
    }
}

#[async_trait]
impl<R: Runnable> Runnable for PolicyGate<R> {
    async fn invoke(&self, request: Request) -> Result<String> {
        Ok(self.run(request).await?.into_text())
    }
}

use async_trait::async_trait;
use docgen_core::Request;

use crate::error::Result;

/// A composable pipeline stage taking a request and producing text.
#[async_trait]
pub trait Runnable: Send + Sync {
    async fn invoke(&self, request: Request) -> Result<String>;
}

//! Text generation abstraction.

use anyhow::Result;
use async_trait::async_trait;

/// One prompt in, raw completion text out. Implementations own their
/// transport and timeouts; callers treat any error as a soft failure.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

//! Canned generator for tests.

use crate::llm::Generator;
use anyhow::{anyhow, Result};
use async_trait::async_trait;

enum Script {
    Respond(String),
    Fail(String),
}

/// Generator that replays a fixed outcome for every prompt.
pub struct MockGenerator {
    script: Script,
}

impl MockGenerator {
    /// Always return `text` as the completion.
    pub fn respond(text: impl Into<String>) -> Self {
        Self {
            script: Script::Respond(text.into()),
        }
    }

    /// Always fail with `message`, as an unreachable backend would.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            script: Script::Fail(message.into()),
        }
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        match &self.script {
            Script::Respond(text) => Ok(text.clone()),
            Script::Fail(message) => Err(anyhow!("{}", message)),
        }
    }
}

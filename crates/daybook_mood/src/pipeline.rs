//! End-to-end mood pipeline: analyze, then reconcile.

use crate::analyzer::MoodAnalyzer;
use crate::classifier::RuleClassifier;
use crate::llm::Generator;
use crate::providers::ollama::OllamaGenerator;
use crate::validator::Reconciler;
use anyhow::Result;
use daybook_core::{LlmConfig, MoodResult};
use std::sync::Arc;

/// The one entry point callers use to score an entry. Wraps the analyzer
/// and the reconciler so no unvalidated result ever escapes.
pub struct MoodPipeline {
    analyzer: MoodAnalyzer,
    reconciler: Reconciler,
}

impl MoodPipeline {
    /// Pipeline backed by an Ollama endpoint.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let generator = Arc::new(OllamaGenerator::new(config)?);
        Ok(Self::with_generator(generator))
    }

    /// Pipeline over any generator. Used by tests with canned backends.
    pub fn with_generator(generator: Arc<dyn Generator>) -> Self {
        Self {
            analyzer: MoodAnalyzer::new(generator),
            reconciler: Reconciler::new(RuleClassifier::new()),
        }
    }

    /// Analyze one entry and reconcile the result against its text.
    /// Infallible by construction.
    pub async fn analyze_and_reconcile(&self, text: &str) -> MoodResult {
        let candidate = self.analyzer.analyze(text).await;
        self.reconciler.reconcile(&candidate, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_pipeline_is_send_sync() {
        assert_send_sync::<MoodPipeline>();
    }
}

//! Mood inference for journal entries.
//!
//! A model-backed analyzer produces a candidate mood result, a rule-based
//! classifier stands in when the model is unavailable, and a reconciler
//! corrects every candidate against the entry text before it is persisted.
//! The pipeline as a whole is infallible: bad model output degrades to
//! keyword evidence, never to an error.

pub mod analyzer;
pub mod classifier;
pub mod lexicon;
pub mod llm;
pub mod pipeline;
pub mod prompts;
pub mod providers;
pub mod validator;

pub use analyzer::MoodAnalyzer;
pub use classifier::RuleClassifier;
pub use llm::Generator;
pub use pipeline::MoodPipeline;
pub use providers::mock::MockGenerator;
pub use providers::ollama::OllamaGenerator;
pub use validator::Reconciler;

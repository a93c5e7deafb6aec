pub mod config;
pub mod emotion;
pub mod mood;

pub use config::{DaybookConfig, JournalConfig, LlmConfig, StorageConfig};
pub use emotion::{Emotion, ParseEmotionError, Polarity};
pub use mood::{MoodResult, FALLBACK_KEYWORDS};

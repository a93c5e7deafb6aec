use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

// ============================================================================
// Top-level config
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DaybookConfig {
    pub llm: LlmConfig,
    pub storage: StorageConfig,
    pub journal: JournalConfig,
}

impl DaybookConfig {
    /// Load config from a TOML file, falling back to defaults for missing
    /// fields. After loading, env var overrides are applied.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;
        let mut config: DaybookConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML config")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Try to load from path; if the file doesn't exist, return defaults with
    /// env overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::info!("Config file not found or invalid ({}), using defaults", e);
                let mut cfg = Self::default();
                cfg.apply_env_overrides();
                cfg
            }
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("DAYBOOK_OLLAMA_MODEL") {
            self.llm.model = v;
        }
        if let Ok(v) = std::env::var("DAYBOOK_OLLAMA_URL") {
            self.llm.endpoint = v;
        }
        if let Ok(v) = std::env::var("DAYBOOK_OLLAMA_TIMEOUT") {
            if let Ok(n) = v.parse() {
                self.llm.timeout_secs = n;
            }
        }
        if let Ok(v) = std::env::var("DAYBOOK_DB") {
            self.storage.db_path = v;
        }
    }
}

// ============================================================================
// Sub-configs
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Model name as known to the Ollama server.
    pub model: String,
    /// Full URL of the generate endpoint.
    pub endpoint: String,
    /// Hard timeout for one inference request. On expiry the analyzer falls
    /// back to the rule-based classifier instead of retrying.
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "llama3.2:1b".to_string(),
            endpoint: "http://localhost:11434/api/generate".to_string(),
            timeout_secs: 20,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: "daybook.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JournalConfig {
    /// Longest accepted entry text, in characters.
    pub max_entry_chars: usize,
    /// Default trailing window for mood statistics.
    pub stats_window_days: i64,
}

impl Default for JournalConfig {
    fn default() -> Self {
        Self {
            max_entry_chars: 5000,
            stats_window_days: 30,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

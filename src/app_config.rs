use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::thread;

/// Application configuration module
/// This module handles the library configuration including loading,
/// validating and saving configuration settings.
/// Represents the translator configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Name of the translation engine to use
    #[serde(default = "default_engine")]
    pub engine: String,

    /// Translation pipeline settings
    #[serde(default)]
    pub translation: TranslationSettings,

    /// Translation memo cache settings
    #[serde(default)]
    pub cache: CacheSettings,
}

/// Settings for the translation pipeline and tree engine
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TranslationSettings {
    /// Number of tree nodes processed per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Maximum number of concurrent engine requests
    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    /// Maximum number of retry attempts after a failed node translation
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Base backoff time in milliseconds for exponential retry backoff
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Lower bound of the randomized pause between node batches, in milliseconds
    #[serde(default = "default_batch_pause_min_ms")]
    pub batch_pause_min_ms: u64,

    /// Upper bound of the randomized pause between node batches, in milliseconds.
    /// Zero disables the pause entirely.
    #[serde(default = "default_batch_pause_max_ms")]
    pub batch_pause_max_ms: u64,

    /// Per-request timeout in seconds for engine calls
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Input length limit applied when the engine does not report one
    #[serde(default = "default_input_limit")]
    pub default_input_limit: usize,

    /// Base URL for the LibreTranslate engine
    #[serde(default = "default_libretranslate_url")]
    pub libretranslate_url: String,

    /// API key for engines that require one
    #[serde(default = "String::new")]
    pub api_key: String,
}

/// Settings for the translation memo cache
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CacheSettings {
    /// Whether the memo cache is enabled
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,

    /// Maximum number of memoized translations before LRU eviction
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

fn default_engine() -> String {
    "google".to_string()
}

fn default_batch_size() -> usize {
    50
}

fn default_max_concurrent_requests() -> usize {
    thread::available_parallelism().map_or(4, |n| n.get())
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000
}

fn default_batch_pause_min_ms() -> u64 {
    1000
}

fn default_batch_pause_max_ms() -> u64 {
    3000
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_input_limit() -> usize {
    1000
}

fn default_libretranslate_url() -> String {
    "https://libretranslate.com".to_string()
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_capacity() -> usize {
    4096
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            max_concurrent_requests: default_max_concurrent_requests(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
            batch_pause_min_ms: default_batch_pause_min_ms(),
            batch_pause_max_ms: default_batch_pause_max_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            default_input_limit: default_input_limit(),
            libretranslate_url: default_libretranslate_url(),
            api_key: String::new(),
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            capacity: default_cache_capacity(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            translation: TranslationSettings::default(),
            cache: CacheSettings::default(),
        }
    }
}

impl Config {
    /// Create a default configuration for the given engine
    pub fn for_engine(engine: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))?;
        Ok(())
    }

    /// Validate the configuration values
    pub fn validate(&self) -> Result<()> {
        if self.engine.trim().is_empty() {
            return Err(anyhow!("Engine name cannot be empty"));
        }
        if self.translation.batch_size < 1 {
            return Err(anyhow!("Batch size must be at least 1"));
        }
        if self.translation.max_concurrent_requests < 1 {
            return Err(anyhow!("Max concurrent requests must be at least 1"));
        }
        if self.translation.default_input_limit < 1 {
            return Err(anyhow!("Default input limit must be at least 1"));
        }
        if self.translation.batch_pause_min_ms > self.translation.batch_pause_max_ms {
            return Err(anyhow!(
                "Batch pause lower bound ({} ms) exceeds upper bound ({} ms)",
                self.translation.batch_pause_min_ms,
                self.translation.batch_pause_max_ms
            ));
        }
        if self.cache.capacity < 1 {
            return Err(anyhow!("Cache capacity must be at least 1"));
        }
        Ok(())
    }
}

/*!
 * Engine implementations for different machine-translation services.
 *
 * This module contains client implementations for the supported engines:
 * - Google: unauthenticated Google Translate web endpoint
 * - LibreTranslate: self-hosted or hosted LibreTranslate server
 * - DeepL: DeepL API (free or pro)
 * - Mock: deterministic in-process engine for tests and offline use
 */

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;

use crate::app_config::Config;
use crate::errors::{EngineError, TranslationError, TranslationResult};

/// Result of a language-detection request
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Detected language code
    pub language: String,
    /// Confidence score in (0, 1]
    pub score: f64,
}

/// Common trait for all translation engines
///
/// This trait defines the interface that all engine implementations must
/// follow, allowing them to be used interchangeably by the translation
/// service. Each call is a single attempt; retry policy belongs to the
/// caller.
#[async_trait]
pub trait TranslationEngine: Send + Sync + Debug {
    /// Name the engine is registered under
    fn name(&self) -> &str;

    /// Maximum input length per call, when the engine reports one
    fn input_limit(&self) -> Option<usize>;

    /// Translate one piece of text between the given language codes
    ///
    /// # Arguments
    /// * `text` - The text to translate
    /// * `source` - Source language code, or "auto" for detection
    /// * `target` - Target language code
    ///
    /// # Returns
    /// * `Result<String, EngineError>` - The translated text or an error
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, EngineError>;

    /// The engine's capability table: source code -> reachable target codes
    async fn languages(&self) -> Result<HashMap<String, HashSet<String>>, EngineError>;

    /// Detect the language of the given text
    async fn detect(&self, text: &str) -> Result<Detection, EngineError>;
}

/// Engine used when none is configured
pub const DEFAULT_ENGINE: &str = "google";

const ENGINE_NAMES: [&str; 4] = ["google", "libretranslate", "deepl", "mock"];

/// Names of all registered engines
pub fn available_engines() -> &'static [&'static str] {
    &ENGINE_NAMES
}

/// Resolve an engine name to a client instance.
///
/// The registry is explicit and resolved at construction time; an unknown
/// name fails fast with `InvalidArgument` before any network activity.
pub fn create_engine(name: &str, config: &Config) -> TranslationResult<Arc<dyn TranslationEngine>> {
    let timeout = std::time::Duration::from_secs(config.translation.request_timeout_secs);
    match name.trim().to_lowercase().as_str() {
        "google" => Ok(Arc::new(google::GoogleTranslate::new(timeout))),
        "libretranslate" => Ok(Arc::new(libretranslate::LibreTranslate::new(
            &config.translation.libretranslate_url,
            &config.translation.api_key,
            timeout,
        ))),
        "deepl" => Ok(Arc::new(deepl::DeepL::new(
            &config.translation.api_key,
            timeout,
        ))),
        "mock" => Ok(Arc::new(mock::MockEngine::working())),
        other => Err(TranslationError::InvalidArgument(format!(
            "Unknown translation engine: '{}' (available: {})",
            other,
            ENGINE_NAMES.join(", ")
        ))),
    }
}

/// Build an any-to-any capability table over a flat code list
pub(crate) fn any_to_any(codes: &[&str]) -> HashMap<String, HashSet<String>> {
    let mut pairs = HashMap::with_capacity(codes.len());
    for source in codes {
        let targets: HashSet<String> = codes
            .iter()
            .filter(|code| *code != source)
            .map(|code| code.to_string())
            .collect();
        pairs.insert(source.to_string(), targets);
    }
    pairs
}

pub mod deepl;
pub mod google;
pub mod libretranslate;
pub mod mock;

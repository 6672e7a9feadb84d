/*!
 * Mock engine for testing and offline use.
 *
 * The mock engine simulates different behaviors:
 * - `MockEngine::working()` - Always succeeds with bracketed text
 * - `MockEngine::failing()` - Always fails with an error
 * - `MockEngine::flaky(n)` - Fails the first n calls, then succeeds
 * - `MockEngine::intermittent(n)` - Fails every nth call
 * - `MockEngine::slow(ms)` - Succeeds after a delay
 */

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::{Detection, TranslationEngine};
use crate::errors::EngineError;

/// Behavior mode for the mock engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a deterministic translation
    Working,
    /// Always fails with a request error
    Failing,
    /// Fails the first `fail_first` calls, then succeeds
    Flaky { fail_first: usize },
    /// Fails every `fail_every`th call
    Intermittent { fail_every: usize },
    /// Succeeds after the given delay (for timeout testing)
    Slow { delay_ms: u64 },
}

/// Deterministic in-process engine for tests and offline use
#[derive(Debug)]
pub struct MockEngine {
    /// Behavior mode
    behavior: MockBehavior,
    /// Name reported to the capability cache; unique names keep tests isolated
    name: String,
    /// Reported input limit, `None` to exercise the pipeline default
    input_limit: Option<usize>,
    /// Capability table reported by `languages()`
    languages: HashMap<String, HashSet<String>>,
    /// Whether `languages()` fails, simulating an unreachable engine
    fail_languages: bool,
    /// Number of translate calls made against this instance
    call_count: Arc<AtomicUsize>,
}

/// Capability table used unless overridden: a small but realistic web
fn default_languages() -> HashMap<String, HashSet<String>> {
    let mut pairs = HashMap::new();
    pairs.insert(
        "en".to_string(),
        ["fr", "es", "de", "yo"].iter().map(|s| s.to_string()).collect(),
    );
    pairs.insert(
        "fr".to_string(),
        ["en", "es"].iter().map(|s| s.to_string()).collect(),
    );
    pairs.insert(
        "es".to_string(),
        ["en", "fr"].iter().map(|s| s.to_string()).collect(),
    );
    pairs.insert(
        "de".to_string(),
        ["en"].iter().map(|s| s.to_string()).collect(),
    );
    pairs
}

impl MockEngine {
    /// Create a new mock engine with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            name: "mock".to_string(),
            input_limit: None,
            languages: default_languages(),
            fail_languages: false,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Create a working mock engine that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a failing mock engine that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock engine that fails the first `fail_first` calls
    pub fn flaky(fail_first: usize) -> Self {
        Self::new(MockBehavior::Flaky { fail_first })
    }

    /// Create an intermittently failing mock engine
    pub fn intermittent(fail_every: usize) -> Self {
        Self::new(MockBehavior::Intermittent { fail_every })
    }

    /// Create a mock engine that responds after a delay
    pub fn slow(delay_ms: u64) -> Self {
        Self::new(MockBehavior::Slow { delay_ms })
    }

    /// Report a different engine name. The process-wide capability cache is
    /// keyed by name, so tests exercising the cache should pick unique names.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Report an input limit to force the chunked pipeline path
    pub fn with_input_limit(mut self, limit: usize) -> Self {
        self.input_limit = Some(limit);
        self
    }

    /// Replace the reported capability table
    pub fn with_languages(mut self, languages: HashMap<String, HashSet<String>>) -> Self {
        self.languages = languages;
        self
    }

    /// Make `languages()` fail, simulating an unreachable engine
    pub fn with_failing_languages(mut self) -> Self {
        self.fail_languages = true;
        self
    }

    /// Number of translate calls made so far
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Handle to the call counter, usable after the engine is moved into an Arc
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.call_count)
    }

    /// The deterministic translation the working behavior produces
    pub fn expected_translation(text: &str, target: &str) -> String {
        format!("[{}] {}", target, text)
    }
}

#[async_trait]
impl TranslationEngine for MockEngine {
    fn name(&self) -> &str {
        &self.name
    }

    fn input_limit(&self) -> Option<usize> {
        self.input_limit
    }

    async fn translate(
        &self,
        text: &str,
        _source: &str,
        target: &str,
    ) -> Result<String, EngineError> {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;

        match self.behavior {
            MockBehavior::Working => Ok(Self::expected_translation(text, target)),
            MockBehavior::Failing => Err(EngineError::RequestFailed(
                "Mock engine configured to fail".to_string(),
            )),
            MockBehavior::Flaky { fail_first } => {
                if call <= fail_first {
                    Err(EngineError::ConnectionError(format!(
                        "Mock engine failing call {} of {}",
                        call, fail_first
                    )))
                } else {
                    Ok(Self::expected_translation(text, target))
                }
            }
            MockBehavior::Intermittent { fail_every } => {
                if fail_every > 0 && call % fail_every == 0 {
                    Err(EngineError::RequestFailed(format!(
                        "Mock engine failing call {}",
                        call
                    )))
                } else {
                    Ok(Self::expected_translation(text, target))
                }
            }
            MockBehavior::Slow { delay_ms } => {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                Ok(Self::expected_translation(text, target))
            }
        }
    }

    async fn languages(&self) -> Result<HashMap<String, HashSet<String>>, EngineError> {
        if self.fail_languages {
            return Err(EngineError::ConnectionError(
                "Mock engine language listing unavailable".to_string(),
            ));
        }
        Ok(self.languages.clone())
    }

    async fn detect(&self, _text: &str) -> Result<Detection, EngineError> {
        Ok(Detection {
            language: "en".to_string(),
            score: 1.0,
        })
    }
}

/*!
 * Core text translation pipeline.
 *
 * This module contains the TranslationService struct, which validates
 * language pairs, chunks over-long input, and fans the chunks out to the
 * engine with bounded concurrency.
 */

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use log::debug;

use super::cache::TranslationMemo;
use super::retry::BackoffPolicy;
use crate::app_config::TranslationSettings;
use crate::chunker::chunk_text;
use crate::engines::TranslationEngine;
use crate::errors::{EngineError, TranslationError, TranslationResult};
use crate::language_utils::{self, LanguageMap};

/// Translation service tying an engine to the memo cache and settings
pub struct TranslationService {
    /// Engine performing the actual translations
    engine: Arc<dyn TranslationEngine>,

    /// Memo of previously obtained translations
    memo: TranslationMemo,

    /// Pipeline settings
    settings: TranslationSettings,

    /// Retry backoff policy derived from the settings
    backoff: BackoffPolicy,
}

impl TranslationService {
    /// Create a new service around the given engine
    pub fn new(
        engine: Arc<dyn TranslationEngine>,
        memo: TranslationMemo,
        settings: TranslationSettings,
    ) -> Self {
        let backoff = BackoffPolicy::new(settings.max_retries, settings.retry_backoff_ms);
        Self {
            engine,
            memo,
            settings,
            backoff,
        }
    }

    /// The engine this service translates with
    pub fn engine(&self) -> &Arc<dyn TranslationEngine> {
        &self.engine
    }

    /// The memo cache attached to this service
    pub fn memo(&self) -> &TranslationMemo {
        &self.memo
    }

    /// The pipeline settings
    pub fn settings(&self) -> &TranslationSettings {
        &self.settings
    }

    /// The retry backoff policy
    pub fn backoff(&self) -> &BackoffPolicy {
        &self.backoff
    }

    /// Effective input limit: engine-reported, or the configured default
    pub fn input_limit(&self) -> usize {
        self.engine
            .input_limit()
            .unwrap_or(self.settings.default_input_limit)
    }

    /// Capability table of the engine, from the process-wide cache
    pub async fn language_map(&self) -> Arc<LanguageMap> {
        language_utils::language_map_for(self.engine.as_ref()).await
    }

    /// Validate a language pair before any translation work
    pub async fn check_languages(
        &self,
        source: &str,
        target: &str,
    ) -> TranslationResult<(String, String)> {
        let map = self.language_map().await;
        language_utils::check_language_pair(source, target, &map, self.engine.name())
    }

    /// Translate text from `source` to `target`.
    ///
    /// Empty text is returned unchanged. The language pair is validated
    /// before any network call. Text longer than the engine's input limit
    /// is chunked at word boundaries and the chunks are translated
    /// concurrently; results are concatenated in original chunk order
    /// regardless of completion order.
    pub async fn translate_text(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> TranslationResult<String> {
        if text.is_empty() {
            return Ok(String::new());
        }

        let (source, target) = self.check_languages(source, target).await?;

        let limit = self.input_limit();
        if text.len() <= limit {
            return self.engine_call(text, &source, &target).await;
        }

        let chunks = chunk_text(text, limit)?;
        let chunk_count = chunks.len();
        debug!(
            "Translating {} chunks of at most {} bytes ({} -> {})",
            chunk_count, limit, source, target
        );

        let results: Vec<(usize, Result<String, EngineError>)> =
            stream::iter(chunks.into_iter().enumerate())
                .map(|(index, chunk)| {
                    let engine = Arc::clone(&self.engine);
                    let source = source.clone();
                    let target = target.clone();
                    async move {
                        let translated = engine.translate(&chunk, &source, &target).await;
                        (index, translated)
                    }
                })
                .buffer_unordered(self.settings.max_concurrent_requests.max(1))
                .collect()
                .await;

        // Reassemble in original chunk order; completion order is unspecified
        let mut ordered: Vec<Option<String>> = vec![None; chunk_count];
        for (index, result) in results {
            let translated = result.map_err(|error| {
                TranslationError::failed_with(
                    format!(
                        "Chunk {}/{} failed on engine '{}'",
                        index + 1,
                        chunk_count,
                        self.engine.name()
                    ),
                    error,
                )
            })?;
            ordered[index] = Some(translated);
        }

        Ok(ordered.into_iter().flatten().collect::<Vec<_>>().concat())
    }

    /// Memo-aware single-text path used by the tree engine.
    ///
    /// A memo hit bypasses the network entirely; a successful miss stores
    /// the result keyed by the pre-translation text. Failures never write
    /// to the memo.
    pub async fn translate_cached(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> TranslationResult<String> {
        if let Some(memoized) = self.memo.get(text, source, target) {
            return Ok(memoized);
        }

        let translated = self.translate_text(text, source, target).await?;
        self.memo.store(text, source, target, &translated);
        Ok(translated)
    }

    /// One engine call with domain error wrapping
    async fn engine_call(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> TranslationResult<String> {
        self.engine
            .translate(text, source, target)
            .await
            .map_err(|error| {
                TranslationError::failed_with(
                    format!("Translation request to engine '{}' failed", self.engine.name()),
                    error,
                )
            })
    }
}

/*!
 * Batched, concurrent translation of parsed markup trees.
 *
 * The tree engine walks a caller-owned DOM, selects nodes whose tag is in
 * the translatable allow-list, and rewrites their text content in place.
 * Nodes are processed in fixed-size batches with a randomized courtesy
 * pause in between, bounding burst request volume toward the engine.
 */

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use futures::stream::{self, StreamExt};
use log::{debug, error, warn};
use markup5ever_rcdom::{Handle, RcDom};
use rand::Rng;
use tokio::time::sleep;

use super::core::TranslationService;
use crate::app_config::TranslationSettings;
use crate::errors::TranslationResult;
use crate::markup::{TranslatableTags, find_translatable_nodes, set_direct_text};

/// Tree translation engine borrowing a service and an allow-list
pub struct TreeTranslator<'a> {
    /// Service performing per-node translations
    service: &'a TranslationService,

    /// Allow-list of translatable tag names
    tags: &'a TranslatableTags,
}

impl<'a> TreeTranslator<'a> {
    /// Create a tree translator over the given service and allow-list
    pub fn new(service: &'a TranslationService, tags: &'a TranslatableTags) -> Self {
        Self { service, tags }
    }

    /// Translate a whole parsed document in place
    pub async fn translate_tree(
        &self,
        dom: &RcDom,
        source: &str,
        target: &str,
    ) -> TranslationResult<()> {
        self.translate_subtree(&dom.document, source, target).await
    }

    /// Translate every translatable node under `root` in place.
    ///
    /// The language pair is validated before any node is touched. A node
    /// whose translation keeps failing after the configured retries is left
    /// untranslated; the call as a whole still succeeds.
    pub async fn translate_subtree(
        &self,
        root: &Handle,
        source: &str,
        target: &str,
    ) -> TranslationResult<()> {
        let (source, target) = self.service.check_languages(source, target).await?;

        let nodes = find_translatable_nodes(root, self.tags);
        if nodes.is_empty() {
            return Ok(());
        }

        let settings = self.service.settings();
        let batch_size = settings.batch_size.max(1);
        let total_batches = nodes.len().div_ceil(batch_size);
        debug!(
            "Translating {} nodes in {} batches ({} -> {})",
            nodes.len(),
            total_batches,
            source,
            target
        );

        for (batch_index, batch) in nodes.chunks(batch_size).enumerate() {
            self.translate_batch(batch, &source, &target).await;

            // Courtesy pause between batches so the engine sees no sustained burst
            if batch_index + 1 < total_batches {
                let pause = batch_pause(settings);
                if !pause.is_zero() {
                    sleep(pause).await;
                }
            }
        }

        Ok(())
    }

    /// Dispatch one batch of nodes across the bounded worker pool.
    ///
    /// Texts are deduplicated first, so byte-identical node texts cost at
    /// most one engine call per batch even when dispatched concurrently.
    /// Completion order within the batch is unspecified; each result is
    /// applied by text identity, so ordering does not matter.
    async fn translate_batch(&self, batch: &[(Handle, String)], source: &str, target: &str) {
        let workers = self.service.settings().max_concurrent_requests.max(1);

        let mut seen = HashSet::new();
        let unique_texts: Vec<&str> = batch
            .iter()
            .map(|(_, text)| text.as_str())
            .filter(|text| seen.insert(*text))
            .collect();

        let translated: HashMap<&str, Option<String>> = stream::iter(unique_texts)
            .map(|text| async move {
                (text, self.translate_with_retry(text, source, target).await)
            })
            .buffer_unordered(workers)
            .collect()
            .await;

        for (node, text) in batch {
            if let Some(Some(translation)) = translated.get(text.as_str()) {
                set_direct_text(node, translation);
            }
        }
    }

    /// Explicit bounded retry loop around the memo-aware pipeline.
    ///
    /// Returns `None` once the attempts are exhausted; the caller leaves
    /// the node's original text in place.
    async fn translate_with_retry(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Option<String> {
        let policy = self.service.backoff();
        let mut attempt = 0;

        loop {
            match self.service.translate_cached(text, source, target).await {
                Ok(translated) => return Some(translated),
                Err(err) if attempt < policy.max_retries => {
                    attempt += 1;
                    let delay = policy.delay_for(attempt);
                    warn!(
                        "Node translation attempt {} failed, retrying in {:?}: {}",
                        attempt, delay, err
                    );
                    if !delay.is_zero() {
                        sleep(delay).await;
                    }
                }
                Err(err) => {
                    error!(
                        "Leaving node untranslated after {} attempts: {}",
                        attempt + 1,
                        err
                    );
                    return None;
                }
            }
        }
    }
}

/// Randomized pause between node batches; zero when disabled
fn batch_pause(settings: &TranslationSettings) -> Duration {
    if settings.batch_pause_max_ms == 0 {
        return Duration::ZERO;
    }
    let min = settings.batch_pause_min_ms.min(settings.batch_pause_max_ms);
    let millis = rand::rng().random_range(min..=settings.batch_pause_max_ms);
    Duration::from_millis(millis)
}

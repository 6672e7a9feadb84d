/*!
 * Translation memoization.
 *
 * This module provides the memo cache that avoids redundant engine calls
 * for byte-identical text. The cache is bounded: least-recently-used
 * entries are evicted once the configured capacity is reached.
 */

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::debug;
use lru::LruCache;
use parking_lot::Mutex;

/// Cache key combining source text, source language, and target language
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MemoKey {
    /// Source text to translate
    source_text: String,

    /// Source language code
    source_language: String,

    /// Target language code
    target_language: String,
}

impl MemoKey {
    fn new(source_text: &str, source_language: &str, target_language: &str) -> Self {
        Self {
            source_text: source_text.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
        }
    }
}

/// Bounded memo of previously obtained translations
pub struct TranslationMemo {
    /// Internal LRU storage
    entries: Arc<Mutex<LruCache<MemoKey, String>>>,

    /// Cache hit counter
    hits: Arc<AtomicUsize>,

    /// Cache miss counter
    misses: Arc<AtomicUsize>,

    /// Whether memoization is enabled
    enabled: bool,
}

impl TranslationMemo {
    /// Create a new memo with the given capacity
    pub fn new(enabled: bool, capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity clamped to at least 1");
        Self {
            entries: Arc::new(Mutex::new(LruCache::new(capacity))),
            hits: Arc::new(AtomicUsize::new(0)),
            misses: Arc::new(AtomicUsize::new(0)),
            enabled,
        }
    }

    /// Get a memoized translation
    pub fn get(
        &self,
        source_text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Option<String> {
        if !self.enabled {
            return None;
        }

        let key = MemoKey::new(source_text, source_language, target_language);
        let mut entries = self.entries.lock();

        match entries.get(&key) {
            Some(translation) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!(
                    "Memo hit for '{}' ({} -> {})",
                    truncate_text(source_text, 30),
                    source_language,
                    target_language
                );
                Some(translation.clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a translation, keyed by the pre-translation text.
    /// Callers must only store successfully obtained translations.
    pub fn store(
        &self,
        source_text: &str,
        source_language: &str,
        target_language: &str,
        translation: &str,
    ) {
        if !self.enabled {
            return;
        }

        let key = MemoKey::new(source_text, source_language, target_language);
        self.entries.lock().put(key, translation.to_string());

        debug!(
            "Memoized translation for '{}' ({} -> {})",
            truncate_text(source_text, 30),
            source_language,
            target_language
        );
    }

    /// Get memo statistics as (hits, misses, hit rate)
    pub fn stats(&self) -> (usize, usize, f64) {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;

        let hit_rate = if total > 0 {
            hits as f64 / total as f64
        } else {
            0.0
        };

        (hits, misses, hit_rate)
    }

    /// Drop all memoized translations and reset the counters
    pub fn clear(&self) {
        self.entries.lock().clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        debug!("Translation memo cleared");
    }

    /// Number of memoized translations
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if the memo is empty
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Check if memoization is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for TranslationMemo {
    fn default() -> Self {
        Self::new(true, 4096)
    }
}

impl Clone for TranslationMemo {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            hits: self.hits.clone(),
            misses: self.misses.clone(),
            enabled: self.enabled,
        }
    }
}

/// Truncate text to a maximum length with ellipsis
fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max_length).collect::<String>())
    }
}

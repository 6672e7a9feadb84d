use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use isolang::Language;
use log::warn;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

use crate::engines::TranslationEngine;
use crate::errors::{LanguageRole, TranslationError, TranslationResult};

/// Language utilities for engine capability tables
///
/// This module owns the per-engine mapping from source language codes to
/// the target codes reachable from them, the process-wide lazy cache of
/// those mappings, and the language-pair validation applied before any
/// network call.
/// Source code that requests detection at translation time
pub const AUTO_LANGUAGE: &str = "auto";

/// Capability table for one engine: source code -> reachable target codes
#[derive(Debug, Clone, Default)]
pub struct LanguageMap {
    pairs: HashMap<String, HashSet<String>>,
}

impl LanguageMap {
    /// Create a capability table from an engine-provided mapping
    pub fn new(pairs: HashMap<String, HashSet<String>>) -> Self {
        Self { pairs }
    }

    /// Create an empty capability table ("no supported languages known")
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of known source languages
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Sorted list of known source language codes
    pub fn source_codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.pairs.keys().cloned().collect();
        codes.sort();
        codes
    }

    /// Check whether a code is a known source language
    pub fn is_supported_source(&self, code: &str) -> TranslationResult<bool> {
        let code = normalize_code(code)?;
        Ok(self.pairs.contains_key(&code))
    }

    /// Target codes reachable from the given source code.
    /// An unknown source yields an empty set, not an error.
    pub fn supported_targets(&self, source: &str) -> TranslationResult<HashSet<String>> {
        let source = normalize_code(source)?;
        Ok(self.pairs.get(&source).cloned().unwrap_or_default())
    }

    /// Whether the engine can translate between the two codes
    pub fn supports_pair(&self, source: &str, target: &str) -> bool {
        if source == target {
            return false;
        }
        match self.pairs.get(source) {
            Some(targets) => targets.contains(target),
            None => false,
        }
    }
}

/// Trim and lowercase a language code, rejecting empty input
pub fn normalize_code(code: &str) -> TranslationResult<String> {
    let normalized = code.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(TranslationError::InvalidArgument(
            "A language code must be provided".to_string(),
        ));
    }
    Ok(normalized)
}

/// English name of a language code, when the code is a known ISO 639 code
pub fn language_name(code: &str) -> Option<&'static str> {
    let code = code.trim().to_lowercase();
    let language = match code.len() {
        2 => Language::from_639_1(&code),
        3 => Language::from_639_3(&code),
        _ => None,
    };
    language.map(|lang| lang.to_name())
}

/// Process-wide cache of capability tables, keyed by engine name.
/// Filled once per engine under a write lock, read concurrently afterwards.
static LANGUAGE_MAPS: Lazy<RwLock<HashMap<String, Arc<LanguageMap>>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Capability table for the given engine, computed lazily and memoized
/// for the process lifetime.
///
/// A failing engine yields an empty table rather than an error; empty
/// tables are not memoized, so a later call can recover once the engine
/// becomes reachable again.
pub async fn language_map_for(engine: &dyn TranslationEngine) -> Arc<LanguageMap> {
    let name = engine.name().to_string();
    if let Some(map) = LANGUAGE_MAPS.read().get(&name) {
        return Arc::clone(map);
    }

    let map = match engine.languages().await {
        Ok(pairs) => Arc::new(LanguageMap::new(pairs)),
        Err(error) => {
            warn!(
                "Could not fetch language map for engine '{}': {}",
                name, error
            );
            return Arc::new(LanguageMap::empty());
        }
    };

    let mut maps = LANGUAGE_MAPS.write();
    Arc::clone(maps.entry(name).or_insert(map))
}

/// Drop the cached capability table for one engine (explicit engine change)
pub fn invalidate_language_map(engine_name: &str) {
    LANGUAGE_MAPS.write().remove(engine_name);
}

/// Validate a language pair against an engine's capability table.
///
/// Returns the normalized pair on success. Checks are ordered: empty codes,
/// identical codes (including "auto"/"auto"), unknown source, unreachable
/// target. When the source is "auto" the engine resolves it at translation
/// time, so no target membership check is performed.
pub fn check_language_pair(
    source: &str,
    target: &str,
    map: &LanguageMap,
    engine_name: &str,
) -> TranslationResult<(String, String)> {
    let source = normalize_code(source)?;
    let target = normalize_code(target)?;

    if source == target {
        return Err(TranslationError::failed(
            "Source language and target language cannot be the same",
        ));
    }

    if source != AUTO_LANGUAGE {
        if !map.is_supported_source(&source)? {
            return Err(TranslationError::UnsupportedLanguage {
                code: source,
                role: LanguageRole::Source,
                engine: engine_name.to_string(),
            });
        }
        if !map.supported_targets(&source)?.contains(&target) {
            return Err(TranslationError::UnsupportedLanguage {
                code: target,
                role: LanguageRole::Target,
                engine: engine_name.to_string(),
            });
        }
    }

    Ok((source, target))
}

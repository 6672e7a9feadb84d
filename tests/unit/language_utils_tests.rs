/*!
 * Tests for capability tables and language-pair validation
 */

use std::collections::{HashMap, HashSet};

use traduct::engines::mock::MockEngine;
use traduct::errors::{LanguageRole, TranslationError};
use traduct::language_utils::{
    LanguageMap, check_language_pair, language_map_for, language_name, normalize_code,
};

use crate::common::unique_engine_name;

fn sample_map() -> LanguageMap {
    let mut pairs: HashMap<String, HashSet<String>> = HashMap::new();
    pairs.insert(
        "en".to_string(),
        ["fr", "es"].iter().map(|s| s.to_string()).collect(),
    );
    pairs.insert(
        "fr".to_string(),
        ["en"].iter().map(|s| s.to_string()).collect(),
    );
    LanguageMap::new(pairs)
}

#[test]
fn test_normalizeCode_withMixedCase_shouldTrimAndLowercase() {
    assert_eq!(normalize_code("  EN ").unwrap(), "en");
}

#[test]
fn test_normalizeCode_withEmptyCode_shouldReturnInvalidArgument() {
    assert!(matches!(
        normalize_code("   "),
        Err(TranslationError::InvalidArgument(_))
    ));
}

#[test]
fn test_isSupportedSource_withKnownCode_shouldReturnTrue() {
    let map = sample_map();
    assert!(map.is_supported_source("en").unwrap());
    assert!(map.is_supported_source(" EN ").unwrap());
}

#[test]
fn test_isSupportedSource_withUnknownCode_shouldReturnFalse() {
    let map = sample_map();
    assert!(!map.is_supported_source("xx").unwrap());
}

#[test]
fn test_isSupportedSource_withEmptyCode_shouldReturnInvalidArgument() {
    let map = sample_map();
    assert!(matches!(
        map.is_supported_source(""),
        Err(TranslationError::InvalidArgument(_))
    ));
}

#[test]
fn test_supportedTargets_withUnknownCode_shouldReturnEmptySet() {
    let map = sample_map();
    let targets = map.supported_targets("xx").unwrap();
    assert!(targets.is_empty());
}

#[test]
fn test_supportedTargets_withKnownCode_shouldReturnTargets() {
    let map = sample_map();
    let targets = map.supported_targets("en").unwrap();
    assert!(targets.contains("fr"));
    assert!(targets.contains("es"));
    assert_eq!(targets.len(), 2);
}

#[test]
fn test_supportsPair_withReachableTarget_shouldReturnTrue() {
    let map = sample_map();
    assert!(map.supports_pair("en", "fr"));
}

#[test]
fn test_supportsPair_withSameLanguage_shouldReturnFalse() {
    let map = sample_map();
    assert!(!map.supports_pair("en", "en"));
}

#[test]
fn test_sourceCodes_shouldBeSorted() {
    let map = sample_map();
    assert_eq!(map.source_codes(), vec!["en".to_string(), "fr".to_string()]);
}

#[test]
fn test_checkLanguagePair_withValidPair_shouldReturnNormalizedPair() {
    let map = sample_map();
    let pair = check_language_pair(" EN", "fr ", &map, "test").unwrap();
    assert_eq!(pair, ("en".to_string(), "fr".to_string()));
}

#[test]
fn test_checkLanguagePair_withSameLanguage_shouldReturnFailed() {
    let map = sample_map();
    let result = check_language_pair("en", "en", &map, "test");
    assert!(matches!(result, Err(TranslationError::Failed { .. })));
}

#[test]
fn test_checkLanguagePair_withAutoAuto_shouldReturnFailed() {
    let map = sample_map();
    let result = check_language_pair("auto", "auto", &map, "test");
    assert!(matches!(result, Err(TranslationError::Failed { .. })));
}

#[test]
fn test_checkLanguagePair_withEmptySource_shouldReturnInvalidArgument() {
    let map = sample_map();
    assert!(matches!(
        check_language_pair("", "fr", &map, "test"),
        Err(TranslationError::InvalidArgument(_))
    ));
}

#[test]
fn test_checkLanguagePair_withUnknownSource_shouldReportSourceRole() {
    let map = sample_map();
    let result = check_language_pair("xy", "en", &map, "test");

    match result {
        Err(TranslationError::UnsupportedLanguage { code, role, engine }) => {
            assert_eq!(code, "xy");
            assert_eq!(role, LanguageRole::Source);
            assert_eq!(engine, "test");
        }
        other => panic!("Expected UnsupportedLanguage, got {:?}", other),
    }
}

#[test]
fn test_checkLanguagePair_withUnreachableTarget_shouldReportTargetRole() {
    let map = sample_map();
    let result = check_language_pair("en", "xx", &map, "test");

    match result {
        Err(TranslationError::UnsupportedLanguage { code, role, .. }) => {
            assert_eq!(code, "xx");
            assert_eq!(role, LanguageRole::Target);
        }
        other => panic!("Expected UnsupportedLanguage, got {:?}", other),
    }
}

#[test]
fn test_checkLanguagePair_withAutoSource_shouldSkipTargetCheck() {
    // "zz" is reachable from nothing, but "auto" defers to the engine
    let map = sample_map();
    let pair = check_language_pair("auto", "zz", &map, "test").unwrap();
    assert_eq!(pair, ("auto".to_string(), "zz".to_string()));
}

#[tokio::test]
async fn test_languageMapFor_withWorkingEngine_shouldCacheMap() {
    let name = unique_engine_name("capability");
    let engine = MockEngine::working().with_name(&name);

    let first = language_map_for(&engine).await;
    assert!(first.is_supported_source("en").unwrap());

    // A second lookup must come from the process-wide cache, not the
    // engine: swap in a failing engine under the same name to prove it.
    let failing = MockEngine::failing().with_name(&name);
    let second = language_map_for(&failing).await;
    assert!(second.is_supported_source("en").unwrap());
}

#[tokio::test]
async fn test_languageMapFor_withUnreachableEngine_shouldReturnEmptyMap() {
    let name = unique_engine_name("capability-unreachable");
    let engine = MockEngine::working()
        .with_name(&name)
        .with_failing_languages();

    let map = language_map_for(&engine).await;
    assert!(map.is_empty());
}

#[tokio::test]
async fn test_languageMapFor_withRecoveredEngine_shouldNotCacheEmptyMap() {
    let name = unique_engine_name("capability-recovered");

    // First lookup fails and yields an empty table
    let down = MockEngine::working()
        .with_name(&name)
        .with_failing_languages();
    assert!(language_map_for(&down).await.is_empty());

    // The empty table was not cached, so a reachable engine fills it in
    let up = MockEngine::working().with_name(&name);
    let map = language_map_for(&up).await;
    assert!(map.is_supported_source("en").unwrap());
}

#[tokio::test]
async fn test_invalidateLanguageMap_shouldDropCachedEntry() {
    let name = unique_engine_name("capability-invalidate");

    let up = MockEngine::working().with_name(&name);
    assert!(!language_map_for(&up).await.is_empty());

    traduct::language_utils::invalidate_language_map(&name);

    // With the cache entry dropped, an unreachable engine yields an empty map
    let down = MockEngine::working()
        .with_name(&name)
        .with_failing_languages();
    assert!(language_map_for(&down).await.is_empty());
}

#[test]
fn test_languageName_withKnownCodes_shouldResolve() {
    assert_eq!(language_name("en"), Some("English"));
    assert_eq!(language_name("fra"), Some("French"));
}

#[test]
fn test_languageName_withUnknownCode_shouldReturnNone() {
    assert_eq!(language_name("zz"), None);
    assert_eq!(language_name("notacode"), None);
}

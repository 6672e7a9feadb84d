/*!
 * Tests for error types
 */

use std::error::Error;
use std::time::Duration;

use traduct::errors::{EngineError, LanguageRole, TranslationError};

#[test]
fn test_invalidArgument_display_shouldIncludeMessage() {
    let error = TranslationError::InvalidArgument("chunk size must be at least 1".to_string());
    assert_eq!(
        error.to_string(),
        "Invalid argument: chunk size must be at least 1"
    );
}

#[test]
fn test_unsupportedLanguage_display_shouldNameCodeRoleAndEngine() {
    let error = TranslationError::UnsupportedLanguage {
        code: "xy".to_string(),
        role: LanguageRole::Source,
        engine: "google".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Unsupported source language 'xy' for translation engine 'google'"
    );
}

#[test]
fn test_unsupportedLanguage_display_withTargetRole_shouldSayTarget() {
    let error = TranslationError::UnsupportedLanguage {
        code: "xx".to_string(),
        role: LanguageRole::Target,
        engine: "deepl".to_string(),
    };
    assert!(error.to_string().contains("target language 'xx'"));
}

#[test]
fn test_failed_withCause_shouldExposeSourceChain() {
    let cause = EngineError::RequestFailed("connection reset".to_string());
    let error = TranslationError::failed_with("Engine call failed", cause);

    assert_eq!(error.to_string(), "Translation failed: Engine call failed");
    let source = error.source().expect("cause must be chained");
    assert!(source.to_string().contains("connection reset"));
}

#[test]
fn test_failed_withoutCause_shouldHaveNoSource() {
    let error = TranslationError::failed("source and target language cannot be the same");
    assert!(error.source().is_none());
}

#[test]
fn test_engineError_isRetryable_shouldClassifyTransientFailures() {
    assert!(EngineError::RequestFailed("boom".to_string()).is_retryable());
    assert!(EngineError::ConnectionError("refused".to_string()).is_retryable());
    assert!(EngineError::Timeout(Duration::from_secs(30)).is_retryable());
    assert!(EngineError::RateLimitExceeded("slow down".to_string()).is_retryable());
    assert!(
        EngineError::ApiError {
            status_code: 503,
            message: "unavailable".to_string()
        }
        .is_retryable()
    );
}

#[test]
fn test_engineError_isRetryable_shouldRejectPermanentFailures() {
    assert!(!EngineError::ParseError("bad json".to_string()).is_retryable());
    assert!(!EngineError::Unsupported("no detect".to_string()).is_retryable());
    assert!(
        !EngineError::ApiError {
            status_code: 400,
            message: "bad request".to_string()
        }
        .is_retryable()
    );
}

#[test]
fn test_engineError_apiError_display_shouldIncludeStatusCode() {
    let error = EngineError::ApiError {
        status_code: 429,
        message: "too many requests".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Engine responded with error: 429 - too many requests"
    );
}

#[test]
fn test_languageRole_display_shouldBeLowercase() {
    assert_eq!(LanguageRole::Source.to_string(), "source");
    assert_eq!(LanguageRole::Target.to_string(), "target");
}

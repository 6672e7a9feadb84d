use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde_json::Value;

use super::{Detection, TranslationEngine, any_to_any};
use crate::errors::EngineError;

/// Default endpoint of the unauthenticated Google Translate web API
const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";

/// Documented input limit of the web endpoint, in characters
const INPUT_LIMIT: usize = 5000;

/// Language codes accepted by the web endpoint. Translation is possible
/// between any two distinct codes in this list.
const SUPPORTED_CODES: [&str; 58] = [
    "af", "ar", "az", "be", "bg", "bn", "bs", "ca", "cs", "cy", "da", "de", "el", "en", "eo", "es",
    "et", "eu", "fa", "fi", "fr", "ga", "gl", "gu", "ha", "hi", "hr", "ht", "hu", "hy", "id", "is",
    "it", "ja", "ka", "kk", "km", "kn", "ko", "lt", "lv", "mk", "ml", "mr", "ms", "nl", "no", "pl",
    "pt", "ro", "ru", "sk", "sl", "sv", "th", "tr", "uk", "vi",
];

/// Client for the unauthenticated Google Translate web endpoint
#[derive(Debug)]
pub struct GoogleTranslate {
    /// Base URL of the endpoint
    base_url: String,
    /// HTTP client for making requests
    client: Client,
}

impl GoogleTranslate {
    /// Create a new client with the given per-request timeout
    pub fn new(timeout: Duration) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// Create a new client against a custom base URL (proxies, tests)
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Issue one request against the `translate_a/single` endpoint
    async fn request(&self, text: &str, source: &str, target: &str) -> Result<Value, EngineError> {
        let url = format!("{}/translate_a/single", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("User-Agent", "Mozilla/5.0")
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Google Translate request failed: {} - {}", status, message);
            if status.as_u16() == 429 {
                return Err(EngineError::RateLimitExceeded(message));
            }
            return Err(EngineError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| EngineError::ParseError(e.to_string()))
    }
}

/// Join the translated segments of a `translate_a/single` payload
pub fn parse_gtx_translation(payload: &Value) -> Result<String, EngineError> {
    let segments = payload
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| EngineError::ParseError("Missing translation segments".to_string()))?;

    let mut translated = String::new();
    for segment in segments {
        if let Some(text) = segment.get(0).and_then(Value::as_str) {
            translated.push_str(text);
        }
    }

    if translated.is_empty() {
        return Err(EngineError::ParseError(
            "Empty translation in response".to_string(),
        ));
    }
    Ok(translated)
}

/// Extract the detected source language and confidence from a payload.
/// The code sits at index 2, the confidence (when present) at index 6.
pub fn parse_gtx_detection(payload: &Value) -> Result<Detection, EngineError> {
    let language = payload
        .get(2)
        .and_then(Value::as_str)
        .ok_or_else(|| EngineError::ParseError("Missing detected language".to_string()))?;

    let score = payload
        .get(6)
        .and_then(Value::as_f64)
        .filter(|score| *score > 0.0 && *score <= 1.0)
        .unwrap_or(1.0);

    Ok(Detection {
        language: language.to_string(),
        score,
    })
}

#[async_trait]
impl TranslationEngine for GoogleTranslate {
    fn name(&self) -> &str {
        "google"
    }

    fn input_limit(&self) -> Option<usize> {
        Some(INPUT_LIMIT)
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, EngineError> {
        let payload = self.request(text, source, target).await?;
        parse_gtx_translation(&payload)
    }

    async fn languages(&self) -> Result<HashMap<String, HashSet<String>>, EngineError> {
        Ok(any_to_any(&SUPPORTED_CODES))
    }

    async fn detect(&self, text: &str) -> Result<Detection, EngineError> {
        // The endpoint has no standalone detect call; a translation with
        // source "auto" reports the detected language alongside the result.
        let payload = self.request(text, "auto", "en").await?;
        parse_gtx_detection(&payload)
    }
}

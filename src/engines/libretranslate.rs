use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{Detection, TranslationEngine};
use crate::errors::EngineError;

/// Input limit enforced by the hosted LibreTranslate instances, in characters
const INPUT_LIMIT: usize = 2000;

/// Client for a LibreTranslate server
#[derive(Debug)]
pub struct LibreTranslate {
    /// Base URL of the server, without a trailing slash
    base_url: String,
    /// API key, empty when the server does not require one
    api_key: String,
    /// HTTP client for making requests
    client: Client,
}

/// Translate request for the LibreTranslate API
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    api_key: &'a str,
}

/// Translate response from the LibreTranslate API
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// One entry of the `/languages` listing
#[derive(Debug, Deserialize)]
pub struct LanguageEntry {
    /// Language code
    pub code: String,
    /// Target codes reachable from this language
    #[serde(default)]
    pub targets: Vec<String>,
}

/// Detect request for the LibreTranslate API
#[derive(Debug, Serialize)]
struct DetectRequest<'a> {
    q: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    api_key: &'a str,
}

/// One entry of a `/detect` response
#[derive(Debug, Deserialize)]
struct DetectEntry {
    /// Confidence percentage in 0-100
    confidence: f64,
    /// Detected language code
    language: String,
}

impl LibreTranslate {
    /// Create a new client for the given server
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Map a non-success response to an engine error
    async fn status_error(response: reqwest::Response) -> EngineError {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        error!("LibreTranslate request failed: {} - {}", status, message);
        if status.as_u16() == 429 {
            EngineError::RateLimitExceeded(message)
        } else {
            EngineError::ApiError {
                status_code: status.as_u16(),
                message,
            }
        }
    }
}

#[async_trait]
impl TranslationEngine for LibreTranslate {
    fn name(&self) -> &str {
        "libretranslate"
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
        let request = TranslateRequest {
            q: text,
            source,
            target,
            format: "text",
            api_key: &self.api_key,
        };

        let response = self
            .client
            .post(format!("{}/translate", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let translated: TranslateResponse = response
            .json()
            .await
            .map_err(|e| EngineError::ParseError(e.to_string()))?;
        Ok(translated.translated_text)
    }

    async fn languages(&self) -> Result<HashMap<String, HashSet<String>>, EngineError> {
        let response = self
            .client
            .get(format!("{}/languages", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let entries: Vec<LanguageEntry> = response
            .json()
            .await
            .map_err(|e| EngineError::ParseError(e.to_string()))?;
        Ok(capability_map(entries))
    }

    async fn detect(&self, text: &str) -> Result<Detection, EngineError> {
        let request = DetectRequest {
            q: text,
            api_key: &self.api_key,
        };

        let response = self
            .client
            .post(format!("{}/detect", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let mut entries: Vec<DetectEntry> = response
            .json()
            .await
            .map_err(|e| EngineError::ParseError(e.to_string()))?;

        entries.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        let best = entries
            .into_iter()
            .next()
            .ok_or_else(|| EngineError::ParseError("Empty detection response".to_string()))?;

        Ok(Detection {
            language: best.language,
            // The server reports a percentage; normalize into (0, 1]
            score: (best.confidence / 100.0).clamp(f64::MIN_POSITIVE, 1.0),
        })
    }
}

/// Build a capability table from a `/languages` listing
pub fn capability_map(entries: Vec<LanguageEntry>) -> HashMap<String, HashSet<String>> {
    entries
        .into_iter()
        .map(|entry| {
            let code = entry.code.clone();
            let targets: HashSet<String> = entry
                .targets
                .into_iter()
                .filter(|target| *target != entry.code)
                .collect();
            (code, targets)
        })
        .collect()
}

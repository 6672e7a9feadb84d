use std::collections::{HashMap, HashSet};
use std::time::Duration;

use async_trait::async_trait;
use log::error;
use reqwest::Client;
use serde::Deserialize;

use super::{Detection, TranslationEngine};
use crate::errors::EngineError;

/// Endpoint of the free API tier; pro keys use a different host
const FREE_BASE_URL: &str = "https://api-free.deepl.com";
const PRO_BASE_URL: &str = "https://api.deepl.com";

/// Client for the DeepL v2 API
#[derive(Debug)]
pub struct DeepL {
    /// Base URL, derived from the key tier unless overridden
    base_url: String,
    /// API key sent in the authorization header
    api_key: String,
    /// HTTP client for making requests
    client: Client,
}

/// Translate response from the DeepL API
#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<TranslationEntry>,
}

/// One translation of a DeepL response
#[derive(Debug, Deserialize)]
struct TranslationEntry {
    text: String,
    #[serde(default)]
    detected_source_language: Option<String>,
}

/// One entry of the `/v2/languages` listing
#[derive(Debug, Deserialize)]
struct LanguageEntry {
    language: String,
}

impl DeepL {
    /// Create a new client. Free-tier keys (suffix ":fx") are routed to the
    /// free API host.
    pub fn new(api_key: &str, timeout: Duration) -> Self {
        let base_url = if api_key.ends_with(":fx") {
            FREE_BASE_URL
        } else {
            PRO_BASE_URL
        };
        Self::with_base_url(base_url, api_key, timeout)
    }

    /// Create a new client against a custom base URL (proxies, tests)
    pub fn with_base_url(base_url: impl Into<String>, api_key: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.to_string(),
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Issue one translate request, returning text and detected source
    async fn request(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<TranslationEntry, EngineError> {
        let mut params = vec![
            ("text", text.to_string()),
            ("target_lang", target.to_uppercase()),
        ];
        // DeepL auto-detects when source_lang is omitted
        if source != "auto" {
            params.push(("source_lang", source.to_uppercase()));
        }

        let response = self
            .client
            .post(format!("{}/v2/translate", self.base_url))
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let translated: TranslateResponse = response
            .json()
            .await
            .map_err(|e| EngineError::ParseError(e.to_string()))?;
        translated
            .translations
            .into_iter()
            .next()
            .ok_or_else(|| EngineError::ParseError("Empty translations array".to_string()))
    }

    /// Fetch the language listing for one direction ("source" or "target")
    async fn language_codes(&self, direction: &str) -> Result<Vec<String>, EngineError> {
        let response = self
            .client
            .get(format!("{}/v2/languages", self.base_url))
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .query(&[("type", direction)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let entries: Vec<LanguageEntry> = response
            .json()
            .await
            .map_err(|e| EngineError::ParseError(e.to_string()))?;
        Ok(entries
            .into_iter()
            .map(|entry| entry.language.to_lowercase())
            .collect())
    }

    /// Map a non-success response to an engine error
    async fn status_error(response: reqwest::Response) -> EngineError {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        error!("DeepL request failed: {} - {}", status, message);
        match status.as_u16() {
            429 => EngineError::RateLimitExceeded(message),
            456 => EngineError::RateLimitExceeded("Translation quota exceeded".to_string()),
            code => EngineError::ApiError {
                status_code: code,
                message,
            },
        }
    }
}

#[async_trait]
impl TranslationEngine for DeepL {
    fn name(&self) -> &str {
        "deepl"
    }

    fn input_limit(&self) -> Option<usize> {
        // DeepL bounds request size, not characters per call
        None
    }

    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, EngineError> {
        let entry = self.request(text, source, target).await?;
        Ok(entry.text)
    }

    async fn languages(&self) -> Result<HashMap<String, HashSet<String>>, EngineError> {
        let sources = self.language_codes("source").await?;
        let targets: HashSet<String> = self.language_codes("target").await?.into_iter().collect();

        let mut pairs = HashMap::with_capacity(sources.len());
        for source in sources {
            let reachable: HashSet<String> = targets
                .iter()
                .filter(|target| **target != source)
                .cloned()
                .collect();
            pairs.insert(source, reachable);
        }
        Ok(pairs)
    }

    async fn detect(&self, text: &str) -> Result<Detection, EngineError> {
        // No standalone detect endpoint; a translate call reports the
        // detected source language without a confidence figure.
        let entry = self.request(text, "auto", "en").await?;
        let language = entry.detected_source_language.ok_or_else(|| {
            EngineError::ParseError("Response carries no detected language".to_string())
        })?;
        Ok(Detection {
            language: language.to_lowercase(),
            score: 1.0,
        })
    }
}

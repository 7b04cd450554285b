//! Google Translate (gtx) backend
//!
//! Issues an unauthenticated GET against the public gtx endpoint and extracts
//! the first translated segment from its nested-array response. The endpoint
//! has no published schema, so extraction is an explicit stepwise parse that
//! produces a typed error instead of silently propagating missing fields.
//!
//! # Example
//!
//! ```ignore
//! use select_translate::{GoogleTranslate, TranslationBackend};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = GoogleTranslate::new()?;
//!     let result = backend.translate("hello").await?;
//!     println!("{}", result);
//!     Ok(())
//! }
//! ```

use crate::error::{TranslateError, TranslateResult};
use crate::translator::TranslationBackend;
use async_trait::async_trait;
use serde_json::Value;

const GOOGLE_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

/// Unauthenticated gtx translation backend, fixed target language Chinese
#[derive(Debug, Clone)]
pub struct GoogleTranslate {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslate {
    pub fn new() -> TranslateResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                TranslateError::Network(format!("Failed to create HTTP client: {}", e))
            })?;
        Ok(Self::with_client(client))
    }

    /// Build on a shared HTTP client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: GOOGLE_TRANSLATE_URL.to_string(),
        }
    }

    /// Override the endpoint, for tests
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Extract the translated string from the gtx nested-array response.
    ///
    /// The payload is an array of sentence groups; `[0][0][0]` holds the
    /// first translated segment.
    fn parse_response(data: &Value) -> TranslateResult<String> {
        data.get(0)
            .and_then(|v| v.get(0))
            .and_then(|v| v.get(0))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                TranslateError::BackendResponse(
                    "Invalid response format from Google Translate".to_string(),
                )
            })
    }

    async fn request_translation(&self, text: &str) -> TranslateResult<String> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", "zh"),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TranslateError::BackendResponse(format!(
                "HTTP error! status: {}",
                response.status().as_u16()
            )));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| TranslateError::BackendResponse(format!("Failed to parse response: {}", e)))?;
        Self::parse_response(&data)
    }

    fn wrap(&self, err: TranslateError) -> TranslateError {
        TranslateError::BackendResponse(format!(
            "Failed to translate using {}: {}",
            self.engine_name(),
            err
        ))
    }
}

#[async_trait]
impl TranslationBackend for GoogleTranslate {
    async fn translate(&self, text: &str) -> TranslateResult<String> {
        tracing::debug!(engine = "google", text_len = text.len(), "translating");
        self.request_translation(text)
            .await
            .map_err(|e| self.wrap(e))
    }

    fn engine_name(&self) -> &str {
        "Google Translate"
    }
}

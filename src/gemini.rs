//! Gemini backend
//!
//! Issues an authenticated POST to the generateContent endpoint with a prompt
//! instructing translation to Chinese, and extracts the first candidate's
//! text from a typed response schema. Credential presence is checked one
//! layer up (the coordinator refuses to invoke this backend without a stored
//! key); the constructor still rejects blank keys.

use crate::engine::Engine;
use crate::error::{TranslateError, TranslateResult};
use crate::translator::TranslationBackend;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

const GEMINI_GENERATE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";

/// Bearer-token Gemini translation backend, fixed target language Chinese
#[derive(Clone)]
pub struct GeminiTranslate {
    api_key: String,
    client: reqwest::Client,
    base_url: String,
}

/// Response schema for generateContent, narrowed to the fields we read
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// `candidates[0].content.parts[0].text`, or None if any link is missing
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

impl GeminiTranslate {
    pub fn new(api_key: String) -> TranslateResult<Self> {
        if api_key.trim().is_empty() {
            return Err(TranslateError::MissingCredential(Engine::Gemini));
        }
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                TranslateError::Network(format!("Failed to create HTTP client: {}", e))
            })?;
        Self::with_client(api_key, client)
    }

    /// Build on a shared HTTP client
    pub fn with_client(api_key: String, client: reqwest::Client) -> TranslateResult<Self> {
        if api_key.trim().is_empty() {
            return Err(TranslateError::MissingCredential(Engine::Gemini));
        }
        Ok(Self {
            api_key,
            client,
            base_url: GEMINI_GENERATE_URL.to_string(),
        })
    }

    /// Override the endpoint, for tests
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn request_translation(&self, text: &str) -> TranslateResult<String> {
        let body = json!({
            "contents": [{
                "parts": [{
                    "text": format!("Translate the following text to Chinese: \"{}\"", text)
                }]
            }]
        });

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(TranslateError::BackendResponse(format!(
                "HTTP error! status: {}",
                response.status().as_u16()
            )));
        }

        let data: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| TranslateError::BackendResponse(format!("Failed to parse response: {}", e)))?;

        data.first_text().ok_or_else(|| {
            TranslateError::BackendResponse(
                "Invalid response format from Gemini API".to_string(),
            )
        })
    }

    fn wrap(&self, err: TranslateError) -> TranslateError {
        TranslateError::BackendResponse(format!(
            "Failed to translate using {}: {}",
            self.engine_name(),
            err
        ))
    }
}

impl std::fmt::Debug for GeminiTranslate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiTranslate")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl TranslationBackend for GeminiTranslate {
    async fn translate(&self, text: &str) -> TranslateResult<String> {
        tracing::debug!(engine = "gemini", text_len = text.len(), "translating");
        self.request_translation(text)
            .await
            .map_err(|e| self.wrap(e))
    }

    fn engine_name(&self) -> &str {
        "Gemini"
    }
}

//! Mock translation backend for testing
//!
//! A deterministic, network-free backend for exercising the coordinator and
//! content agent. Modes cover the scenarios the real engines can produce:
//! a fixed mapping table, a locale-style suffix, a failure, and a no-op.
//!
//! # Example
//!
//! ```ignore
//! use select_translate::{MockMode, MockTranslator, TranslationBackend};
//!
//! let mock = MockTranslator::new(MockMode::Suffix);
//! let result = mock.translate("hello").await.unwrap();
//! assert_eq!(result, "hello_zh");
//! ```

use crate::coordinator::BackendResolver;
use crate::engine::Engine;
use crate::error::{TranslateError, TranslateResult};
use crate::translator::TranslationBackend;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Mock translation behaviors
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append "_zh": "hello" → "hello_zh"
    Suffix,
    /// Predefined text → translation mappings; unmapped text gets the suffix
    Mappings(HashMap<String, String>),
    /// Fail every call with this message
    Error(String),
    /// Return input unchanged
    NoOp,
}

/// Deterministic backend simulating translation outcomes
#[derive(Debug, Clone)]
pub struct MockTranslator {
    mode: MockMode,
    delay_ms: u64,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self { mode, delay_ms: 0 }
    }

    /// Simulate network latency of `delay_ms` per call
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self { mode, delay_ms }
    }

    /// Convenience constructor for a single text → translation pair
    pub fn mapping(text: &str, translation: &str) -> Self {
        let mut map = HashMap::new();
        map.insert(text.to_string(), translation.to_string());
        Self::new(MockMode::Mappings(map))
    }

    fn apply(&self, text: &str) -> TranslateResult<String> {
        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_zh", text)),
            MockMode::Mappings(map) => Ok(map
                .get(text)
                .cloned()
                .unwrap_or_else(|| format!("{}_zh", text))),
            MockMode::Error(message) => Err(TranslateError::BackendResponse(message.clone())),
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl TranslationBackend for MockTranslator {
    async fn translate(&self, text: &str) -> TranslateResult<String> {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
        self.apply(text)
    }

    fn engine_name(&self) -> &str {
        "Mock Translator"
    }
}

/// Resolver handing out the same mock backend for every engine
#[derive(Clone)]
pub struct MockBackends {
    backend: Arc<dyn TranslationBackend>,
}

impl MockBackends {
    pub fn new(backend: impl TranslationBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }
}

impl BackendResolver for MockBackends {
    fn resolve(
        &self,
        _engine: Engine,
        _gemini_api_key: Option<&str>,
    ) -> TranslateResult<Arc<dyn TranslationBackend>> {
        Ok(Arc::clone(&self.backend))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn suffix_mode_appends_target() {
        let mock = MockTranslator::new(MockMode::Suffix);
        assert_eq!(mock.translate("hello").await.unwrap(), "hello_zh");
    }

    #[tokio::test]
    async fn mappings_mode_prefers_the_table() {
        let mock = MockTranslator::mapping("hello", "你好");
        assert_eq!(mock.translate("hello").await.unwrap(), "你好");
        assert_eq!(mock.translate("bye").await.unwrap(), "bye_zh");
    }

    #[tokio::test]
    async fn error_mode_fails_every_call() {
        let mock = MockTranslator::new(MockMode::Error("simulated outage".to_string()));
        match mock.translate("hello").await {
            Err(TranslateError::BackendResponse(msg)) => assert_eq!(msg, "simulated outage"),
            other => panic!("expected BackendResponse, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn noop_mode_echoes() {
        let mock = MockTranslator::new(MockMode::NoOp);
        assert_eq!(mock.translate("hello").await.unwrap(), "hello");
    }
}

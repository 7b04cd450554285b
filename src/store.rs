//! Persisted settings capability
//!
//! The extension keeps exactly two settings: the preferred translation engine
//! and the Gemini API key. The store is injected wherever settings are read
//! rather than touched as an ambient global.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Key for the preferred engine ("google" by default)
pub const TRANSLATION_ENGINE_KEY: &str = "translationEngine";
/// Key for the Gemini API key (absent by default)
pub const GEMINI_API_KEY_KEY: &str = "geminiApiKey";

/// Async key-value settings store
#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<String>;
    async fn set(&self, key: &str, value: String);
}

/// Preferred engine selector string, defaulting to "google" when unset
pub async fn translation_engine(store: &dyn SettingsStore) -> String {
    store
        .get(TRANSLATION_ENGINE_KEY)
        .await
        .unwrap_or_else(|| "google".to_string())
}

/// Stored Gemini API key, if any
pub async fn gemini_api_key(store: &dyn SettingsStore) -> Option<String> {
    store.get(GEMINI_API_KEY_KEY).await
}

/// In-memory settings store for tests and the CLI
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemorySettings {
    async fn get(&self, key: &str) -> Option<String> {
        self.values.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: String) {
        self.values.write().await.insert(key.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn engine_defaults_to_google() {
        let store = MemorySettings::new();
        assert_eq!(translation_engine(&store).await, "google");
    }

    #[tokio::test]
    async fn engine_reads_stored_preference() {
        let store = MemorySettings::new();
        store
            .set(TRANSLATION_ENGINE_KEY, "gemini".to_string())
            .await;
        assert_eq!(translation_engine(&store).await, "gemini");
    }

    #[tokio::test]
    async fn gemini_key_absent_by_default() {
        let store = MemorySettings::new();
        assert!(gemini_api_key(&store).await.is_none());
        store.set(GEMINI_API_KEY_KEY, "k-123".to_string()).await;
        assert_eq!(gemini_api_key(&store).await.as_deref(), Some("k-123"));
    }
}

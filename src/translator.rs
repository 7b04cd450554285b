//! Translation backend trait
//!
//! The seam between the coordinator and the concrete engines. Every backend
//! (Google, Gemini, the test mock) maps a piece of selected text to a
//! translated string or a typed failure; the target language is fixed by the
//! backend itself, matching the extension's always-translate-to-Chinese
//! behavior.

use crate::error::TranslateResult;
use async_trait::async_trait;

/// A translation engine capable of translating one piece of text
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translate `text`, returning the translated string or a
    /// [`TranslateError`](crate::error::TranslateError) whose message names
    /// the engine.
    async fn translate(&self, text: &str) -> TranslateResult<String>;

    /// Human-readable engine name, used in logs and error prefixes
    fn engine_name(&self) -> &str;
}

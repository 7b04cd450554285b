//! Selection-to-translation coordination
//!
//! The moving parts behind a select-and-translate overlay: a per-page content
//! agent that reacts to selection gestures and manages the overlay, a
//! privileged background coordinator that resolves the configured engine and
//! performs the network call through a pluggable translation backend, a
//! cross-context request/response channel with an enforced respond-exactly-once
//! contract, and a per-context monitor tracking component liveness and recent
//! events.
//!
//! # Example
//!
//! ```ignore
//! use select_translate::{
//!     Anchor, ContentAgent, Coordinator, HttpBackends, MemorySettings, request_channel,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Arc::new(MemorySettings::new());
//!     let coordinator = Coordinator::new(Arc::clone(&settings) as _, Arc::new(HttpBackends::new()?));
//!     let (port, rx) = request_channel(8);
//!     tokio::spawn(coordinator.serve(rx));
//!
//!     let mut agent = ContentAgent::new(1);
//!     let port = port.for_page(1);
//!     agent
//!         .translate_selection(settings.as_ref(), &port, "hello", Anchor { x: 0.0, y: 0.0 })
//!         .await;
//!     println!("{}", agent.overlay().unwrap().text());
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod coordinator;
pub mod engine;
pub mod error;
pub mod gemini;
pub mod google;
pub mod mock;
pub mod monitor;
pub mod protocol;
pub mod store;
pub mod translator;


// Re-export main types for convenient access
pub use agent::{Anchor, ContentAgent, Overlay, OverlayState, PendingTranslation};
pub use coordinator::{BackendResolver, Coordinator, HttpBackends};
pub use engine::Engine;
pub use error::{TranslateError, TranslateResult};
pub use gemini::GeminiTranslate;
pub use google::GoogleTranslate;
pub use mock::{MockBackends, MockMode, MockTranslator};
pub use monitor::{
    ComponentHealth, ComponentRecord, ComponentStatus, ErrorEntry, EventLogEntry, Monitor,
    SenderContext,
};
pub use protocol::{
    Envelope, Request, RequestPort, Responder, TranslateRequest, TranslateResponse,
    request_channel,
};
pub use store::{
    GEMINI_API_KEY_KEY, MemorySettings, SettingsStore, TRANSLATION_ENGINE_KEY, gemini_api_key,
    translation_engine,
};
pub use translator::TranslationBackend;

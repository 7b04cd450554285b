//! Background coordinator
//!
//! Receives translate requests from content agents, resolves the engine and
//! its credentials, invokes the matching backend, and answers each request
//! exactly once. Per request the flow is strictly
//! received → engine resolved → backend invoked → succeeded/failed; there are
//! no retries and no timeout beyond what the HTTP client enforces.

use crate::engine::Engine;
use crate::error::{TranslateError, TranslateResult};
use crate::gemini::GeminiTranslate;
use crate::google::GoogleTranslate;
use crate::monitor::{ComponentStatus, Monitor, SenderContext};
use crate::protocol::{Envelope, Request, TranslateRequest, TranslateResponse};
use crate::store::{SettingsStore, gemini_api_key};
use crate::translator::TranslationBackend;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Name the coordinator registers itself under in its monitor
pub const COMPONENT_NAME: &str = "background";

/// Maps a resolved engine (plus credentials, for engines that need them) to a
/// ready backend. Swappable so tests can run without network access.
pub trait BackendResolver: Send + Sync {
    fn resolve(
        &self,
        engine: Engine,
        gemini_api_key: Option<&str>,
    ) -> TranslateResult<Arc<dyn TranslationBackend>>;
}

/// Real resolver: reqwest-backed backends sharing one HTTP client
#[derive(Debug, Clone)]
pub struct HttpBackends {
    client: reqwest::Client,
}

impl HttpBackends {
    pub fn new() -> TranslateResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| {
                TranslateError::Network(format!("Failed to create HTTP client: {}", e))
            })?;
        Ok(Self { client })
    }
}

impl BackendResolver for HttpBackends {
    fn resolve(
        &self,
        engine: Engine,
        gemini_api_key: Option<&str>,
    ) -> TranslateResult<Arc<dyn TranslationBackend>> {
        match engine {
            Engine::Google => Ok(Arc::new(GoogleTranslate::with_client(self.client.clone()))),
            Engine::Gemini => {
                let key = gemini_api_key
                    .ok_or(TranslateError::MissingCredential(Engine::Gemini))?;
                Ok(Arc::new(GeminiTranslate::with_client(
                    key.to_string(),
                    self.client.clone(),
                )?))
            }
        }
    }
}

/// The privileged context: resolves and invokes translation backends on
/// behalf of content agents
pub struct Coordinator {
    settings: Arc<dyn SettingsStore>,
    backends: Arc<dyn BackendResolver>,
    monitor: Monitor,
}

impl Coordinator {
    pub fn new(settings: Arc<dyn SettingsStore>, backends: Arc<dyn BackendResolver>) -> Self {
        let mut monitor = Monitor::new();
        monitor.register_component(COMPONENT_NAME);
        Self {
            settings,
            backends,
            monitor,
        }
    }

    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    /// Handle one translate request to a terminal response. Every failure is
    /// converted into an error response; no error escapes to the channel.
    pub async fn handle(
        &mut self,
        request: TranslateRequest,
        sender: SenderContext,
    ) -> TranslateResponse {
        debug!(engine = %request.engine, text_len = request.text.len(), "translate request received");
        self.monitor.log_message(
            "runtime",
            json!({ "action": "translate", "engine": request.engine }),
            sender,
        );

        let result = self.run(&request).await;
        match &result {
            Ok(_) => {
                info!(engine = %request.engine, "translation succeeded");
                self.monitor
                    .update_component_status(COMPONENT_NAME, ComponentStatus::Active);
            }
            Err(err) => {
                warn!(engine = %request.engine, error = %err, "translation failed");
                self.monitor.log_error(COMPONENT_NAME, err);
            }
        }
        TranslateResponse::from_result(result)
    }

    async fn run(&self, request: &TranslateRequest) -> TranslateResult<String> {
        let engine: Engine = request.engine.parse()?;
        debug!(engine = %engine, "engine resolved");

        // The Gemini credential check happens here, before any backend (and
        // therefore any network call) is touched.
        let api_key = match engine {
            Engine::Gemini => Some(
                gemini_api_key(self.settings.as_ref())
                    .await
                    .ok_or(TranslateError::MissingCredential(Engine::Gemini))?,
            ),
            Engine::Google => None,
        };

        let backend = self.backends.resolve(engine, api_key.as_deref())?;
        backend.translate(&request.text).await
    }

    /// Drain the request channel, answering each envelope exactly once. Runs
    /// until every [`RequestPort`](crate::protocol::RequestPort) is dropped.
    pub async fn serve(mut self, mut rx: mpsc::Receiver<Envelope>) {
        info!("coordinator serving translate requests");
        while let Some(envelope) = rx.recv().await {
            let Request::Translate(request) = envelope.request;
            let response = self.handle(request, envelope.sender).await;
            envelope.responder.respond(response);
        }
        debug!("request channel closed, coordinator stopping");
    }
}

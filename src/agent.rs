//! Content agent
//!
//! The per-page side of the system: reacts to selection gestures, manages the
//! translation overlay lifecycle, and issues requests over the request port.
//! The overlay moves Hidden → Translating → Result/Error → Hidden; a hidden
//! overlay is simply `None`.
//!
//! An in-flight request is never cancelled. Instead each overlay carries a
//! generation token; a response is applied only when the overlay is still
//! attached and its generation matches, so a stale result can never overwrite
//! the overlay of a newer gesture.

use crate::monitor::{ComponentStatus, Monitor};
use crate::protocol::{RequestPort, TranslateRequest, TranslateResponse};
use crate::store::{SettingsStore, translation_engine};
use tracing::debug;

/// Page coordinates the overlay is anchored to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
}

/// What the overlay currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayState {
    /// Waiting for the response
    Translating,
    Result(String),
    /// User-visible error text, rendered with the error tint
    Error(String),
}

/// The transient overlay anchored near the selection
#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    generation: u64,
    pub anchor: Anchor,
    pub state: OverlayState,
}

impl Overlay {
    /// Displayed text for the current state
    pub fn text(&self) -> &str {
        match &self.state {
            OverlayState::Translating => "Translating...",
            OverlayState::Result(text) => text,
            OverlayState::Error(text) => text,
        }
    }

    /// Whether the overlay renders with the error background tint
    pub fn tinted(&self) -> bool {
        matches!(self.state, OverlayState::Error(_))
    }
}

/// Token tying a pending request to the overlay generation it belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTranslation {
    generation: u64,
}

/// Per-page agent owning the overlay and this context's monitor
pub struct ContentAgent {
    page: u64,
    component: String,
    monitor: Monitor,
    overlay: Option<Overlay>,
    next_generation: u64,
}

impl ContentAgent {
    pub fn new(page: u64) -> Self {
        let component = format!("content_agent_{}", page);
        let mut monitor = Monitor::new();
        monitor.register_component(&component);
        Self {
            page,
            component,
            monitor,
            overlay: None,
            next_generation: 0,
        }
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    /// Current overlay, or None while hidden
    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    /// A selection-completing gesture. Non-empty text replaces any existing
    /// overlay with a fresh Translating one and returns the token for the
    /// request to issue; empty text is a dismissal gesture.
    pub fn on_selection(&mut self, text: &str, anchor: Anchor) -> Option<PendingTranslation> {
        self.monitor
            .update_component_status(&self.component, ComponentStatus::Active);

        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.detach("Overlay removed");
            return None;
        }

        self.next_generation += 1;
        let generation = self.next_generation;
        self.overlay = Some(Overlay {
            generation,
            anchor,
            state: OverlayState::Translating,
        });
        self.monitor.log_event("ui", "Translation overlay created");
        debug!(page = self.page, generation, "overlay shown, translation pending");
        Some(PendingTranslation { generation })
    }

    /// Apply a response for a previously issued request. Returns false (and
    /// changes nothing) when the overlay was dismissed or replaced in the
    /// interim, which is how stale in-flight results get dropped.
    pub fn apply_response(
        &mut self,
        pending: PendingTranslation,
        response: TranslateResponse,
    ) -> bool {
        let Some(overlay) = self.overlay.as_mut() else {
            self.monitor
                .log_event("ui", "Overlay removed before translation completed");
            return false;
        };
        if overlay.generation != pending.generation {
            self.monitor
                .log_event("ui", "Stale translation result discarded");
            return false;
        }

        match response {
            TranslateResponse::Translation { translation } => {
                overlay.state = OverlayState::Result(translation);
                self.monitor
                    .log_event("translation", "Translation displayed successfully");
            }
            TranslateResponse::Error { error } => {
                overlay.state = OverlayState::Error(format!("Error: {}", error));
                self.monitor.log_error(&self.component, &error);
            }
        }
        true
    }

    /// Dismissal gesture: click outside the overlay
    pub fn on_outside_click(&mut self) {
        self.detach("Overlay closed by outside click");
    }

    /// Dismissal gesture: Escape key
    pub fn on_escape(&mut self) {
        self.detach("Overlay closed by Escape key");
    }

    fn detach(&mut self, reason: &str) {
        if self.overlay.take().is_some() {
            self.monitor.log_event("ui", reason);
            debug!(page = self.page, "overlay hidden: {}", reason);
        }
    }

    /// Full gesture cycle: show the overlay, read the engine preference,
    /// issue the request, and apply the response. Overlay creation strictly
    /// precedes the request, which strictly precedes the overlay mutation.
    pub async fn translate_selection(
        &mut self,
        settings: &dyn SettingsStore,
        port: &RequestPort,
        text: &str,
        anchor: Anchor,
    ) -> bool {
        let Some(pending) = self.on_selection(text, anchor) else {
            return false;
        };
        let engine = translation_engine(settings).await;
        self.monitor
            .log_event("translation", format!("Using {} engine", engine));
        let response = port
            .translate(TranslateRequest {
                text: text.trim().to_string(),
                engine,
            })
            .await;
        self.apply_response(pending, response)
    }
}

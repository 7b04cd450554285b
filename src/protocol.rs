//! Cross-context wire protocol and request/response channel
//!
//! Content agents talk to the background coordinator through a single message
//! shape: a translate request answered by exactly one response carrying either
//! a translation or an error, never both. The channel half given to the
//! coordinator ([`Responder`]) consumes itself on use, so the
//! respond-exactly-once contract is enforced by ownership rather than by
//! convention.

use crate::error::TranslateError;
use crate::monitor::SenderContext;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, oneshot};

/// Response sent when the background side is gone (channel closed before or
/// instead of a reply)
const DISCONNECTED: &str = "Background coordinator unavailable";

/// A translate request as carried on the wire.
///
/// `engine` stays a string here; the coordinator parses it and answers
/// "Unknown translation engine" for unrecognized values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub engine: String,
}

/// Envelope of all content-to-background messages, tagged by `action`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Request {
    Translate(TranslateRequest),
}

/// Result of a translate request: exactly one of translation/error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TranslateResponse {
    Translation { translation: String },
    Error { error: String },
}

impl TranslateResponse {
    pub fn from_result(result: Result<String, TranslateError>) -> Self {
        match result {
            Ok(translation) => TranslateResponse::Translation { translation },
            Err(err) => TranslateResponse::Error {
                error: err.to_string(),
            },
        }
    }

    pub fn translation(&self) -> Option<&str> {
        match self {
            TranslateResponse::Translation { translation } => Some(translation),
            TranslateResponse::Error { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            TranslateResponse::Translation { .. } => None,
            TranslateResponse::Error { error } => Some(error),
        }
    }
}

/// Single-use completion handle for one request.
///
/// `respond` takes `self` by value: a responder cannot answer twice, and
/// dropping it unanswered surfaces as a [`DISCONNECTED`] error on the
/// requesting side.
#[derive(Debug)]
pub struct Responder(oneshot::Sender<TranslateResponse>);

impl Responder {
    pub fn respond(self, response: TranslateResponse) {
        if self.0.send(response).is_err() {
            tracing::debug!("requester dropped before the response arrived");
        }
    }
}

/// One queued request plus its origin and completion handle
#[derive(Debug)]
pub struct Envelope {
    pub request: Request,
    pub sender: SenderContext,
    pub responder: Responder,
}

/// Content-side handle to the background request channel
#[derive(Debug, Clone)]
pub struct RequestPort {
    tx: mpsc::Sender<Envelope>,
    sender: SenderContext,
}

impl RequestPort {
    /// Tag requests from this port as originating in the given page context
    pub fn for_page(mut self, page: u64) -> Self {
        self.sender = SenderContext::Page(page);
        self
    }

    /// Send a translate request and await its single response. A closed
    /// channel (background gone) is reported as an error response rather
    /// than a panic, mirroring how a runtime disconnect reaches the page.
    pub async fn translate(&self, request: TranslateRequest) -> TranslateResponse {
        let (tx, rx) = oneshot::channel();
        let envelope = Envelope {
            request: Request::Translate(request),
            sender: self.sender,
            responder: Responder(tx),
        };
        if self.tx.send(envelope).await.is_err() {
            return TranslateResponse::Error {
                error: DISCONNECTED.to_string(),
            };
        }
        match rx.await {
            Ok(response) => response,
            Err(_) => TranslateResponse::Error {
                error: DISCONNECTED.to_string(),
            },
        }
    }
}

/// Create the content-to-background channel pair
pub fn request_channel(buffer: usize) -> (RequestPort, mpsc::Receiver<Envelope>) {
    let (tx, rx) = mpsc::channel(buffer);
    (
        RequestPort {
            tx,
            sender: SenderContext::Background,
        },
        rx,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_wire_shape() {
        let request = Request::Translate(TranslateRequest {
            text: "hello".to_string(),
            engine: "google".to_string(),
        });
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"action": "translate", "text": "hello", "engine": "google"})
        );
        let parsed: Request = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, request);
    }

    #[test]
    fn response_carries_exactly_one_field() {
        let ok = TranslateResponse::Translation {
            translation: "你好".to_string(),
        };
        let value = serde_json::to_value(&ok).unwrap();
        assert_eq!(value, json!({"translation": "你好"}));

        let err = TranslateResponse::Error {
            error: "Unknown translation engine".to_string(),
        };
        let value = serde_json::to_value(&err).unwrap();
        assert_eq!(value, json!({"error": "Unknown translation engine"}));
    }

    #[test]
    fn response_deserializes_either_variant() {
        let ok: TranslateResponse = serde_json::from_value(json!({"translation": "你好"})).unwrap();
        assert_eq!(ok.translation(), Some("你好"));
        let err: TranslateResponse = serde_json::from_value(json!({"error": "boom"})).unwrap();
        assert_eq!(err.error(), Some("boom"));
    }

    #[tokio::test]
    async fn port_round_trip() {
        let (port, mut rx) = request_channel(4);
        let port = port.for_page(5);
        let server = tokio::spawn(async move {
            let envelope = rx.recv().await.unwrap();
            assert_eq!(envelope.sender, SenderContext::Page(5));
            let Request::Translate(request) = envelope.request;
            envelope.responder.respond(TranslateResponse::Translation {
                translation: format!("{}_zh", request.text),
            });
        });

        let response = port
            .translate(TranslateRequest {
                text: "hello".to_string(),
                engine: "google".to_string(),
            })
            .await;
        assert_eq!(response.translation(), Some("hello_zh"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn dropped_responder_surfaces_as_error() {
        let (port, mut rx) = request_channel(4);
        let server = tokio::spawn(async move {
            let envelope = rx.recv().await.unwrap();
            drop(envelope.responder);
        });

        let response = port
            .translate(TranslateRequest {
                text: "hello".to_string(),
                engine: "google".to_string(),
            })
            .await;
        assert_eq!(response.error(), Some(DISCONNECTED));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn closed_channel_surfaces_as_error() {
        let (port, rx) = request_channel(4);
        drop(rx);
        let response = port
            .translate(TranslateRequest {
                text: "hello".to_string(),
                engine: "google".to_string(),
            })
            .await;
        assert_eq!(response.error(), Some(DISCONNECTED));
    }
}

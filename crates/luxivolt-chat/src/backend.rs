//! Chat backend client.
//!
//! The widget talks to the backend through the [`ChatBackend`] trait. The
//! production implementation, [`HttpBackend`], POSTs a JSON body to the
//! configured endpoint and expects `{"response": "..."}` back.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::message::HistoryEntry;

/// Body of the outbound chat request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The new user text.
    pub message: String,
    /// Every message before the new one, oldest first.
    pub conversation_history: Vec<HistoryEntry>,
    /// Request retrieval-augmented generation. Always `true`.
    pub use_rag: bool,
}

/// Successful backend reply.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatReply {
    /// Generated assistant text.
    pub response: String,
    /// Model that produced the reply, if reported.
    #[serde(default)]
    pub model: Option<String>,
    /// Knowledge-base documents the reply drew on.
    #[serde(default)]
    pub sources: Vec<String>,
}

impl ChatReply {
    /// Reply carrying only the response text.
    pub fn text(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            model: None,
            sources: Vec::new(),
        }
    }
}

/// Backend health as reported by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    /// Overall status string (`"healthy"` when up).
    pub status: String,
    /// Knowledge-base status, if reported.
    #[serde(default)]
    pub rag_status: Option<String>,
    /// Number of indexed knowledge-base chunks, if reported.
    #[serde(default)]
    pub indexed_chunks: Option<u64>,
}

/// Something that can answer a chat request.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Produce a reply for `request`.
    async fn reply(&self, request: ChatRequest) -> Result<ChatReply, BackendError>;
}

/// HTTP client for the chat backend.
///
/// No retries and no request timeout: a hung backend keeps the call pending.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpBackend {
    /// Create a client for the given chat endpoint.
    pub fn new(endpoint: Url) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(BackendError::Transport)?;
        Ok(Self { client, endpoint })
    }

    /// The chat endpoint this client posts to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// URL of the backend's health endpoint (same origin, path `/health`).
    pub fn health_url(&self) -> Url {
        let mut url = self.endpoint.clone();
        url.set_path("/health");
        url.set_query(None);
        url.set_fragment(None);
        url
    }

    /// Query the backend's health endpoint.
    pub async fn health(&self) -> Result<HealthReport, BackendError> {
        let response = self
            .client
            .get(self.health_url())
            .send()
            .await
            .map_err(BackendError::Transport)?;
        decode(response).await
    }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn reply(&self, request: ChatRequest) -> Result<ChatReply, BackendError> {
        debug!(
            endpoint = %self.endpoint,
            history_len = request.conversation_history.len(),
            "Sending chat request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(BackendError::Transport)?;

        let reply: ChatReply = decode(response).await?;
        debug!(
            model = reply.model.as_deref().unwrap_or("unknown"),
            sources = ?reply.sources,
            "Received chat reply"
        );
        Ok(reply)
    }
}

/// Check the status, then parse the body as `T`.
async fn decode<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, BackendError> {
    let status = response.status();
    if !status.is_success() {
        return Err(BackendError::Status(status));
    }
    let body = response.bytes().await.map_err(BackendError::Transport)?;
    serde_json::from_slice(&body).map_err(BackendError::Decode)
}

/// Reasons a backend call can fail.
///
/// The widget shows the same fallback for every variant; the distinction
/// only reaches the logs.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Connection, TLS or body transfer failure.
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("Backend returned {0}")]
    Status(StatusCode),

    /// Body was not the expected JSON shape.
    #[error("Malformed response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The task running the request panicked or was aborted.
    #[error("Reply task failed: {0}")]
    TaskFailed(String),
}

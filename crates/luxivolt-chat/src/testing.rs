//! In-process backends for tests.
//!
//! Enabled for this crate's own tests and, for downstream crates, through the
//! `testing` feature.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::Semaphore;

use crate::backend::{BackendError, ChatBackend, ChatReply, ChatRequest};

struct ScriptedReply {
    outcome: Result<ChatReply, BackendError>,
    gate: Option<Arc<Semaphore>>,
}

/// Backend that answers from a queue of prepared outcomes.
///
/// Every request is recorded. When the queue is empty the backend answers
/// with `503 Service Unavailable`.
#[derive(Default)]
pub struct ScriptedBackend {
    script: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<ChatRequest>>,
}

/// Holds a scripted reply back until released.
#[derive(Debug, Clone)]
pub struct ReplyGate(Arc<Semaphore>);

impl ReplyGate {
    /// Let the held reply through.
    pub fn release(&self) {
        self.0.add_permits(1);
    }
}

impl ScriptedBackend {
    /// Create a backend with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply.
    pub fn push_reply(&self, response: impl Into<String>) {
        self.push(Ok(ChatReply::text(response)), None);
    }

    /// Queue a failure.
    pub fn push_failure(&self, error: BackendError) {
        self.push(Err(error), None);
    }

    /// Queue a successful reply that stays pending until the gate is released.
    pub fn push_held_reply(&self, response: impl Into<String>) -> ReplyGate {
        let gate = Arc::new(Semaphore::new(0));
        self.push(Ok(ChatReply::text(response)), Some(Arc::clone(&gate)));
        ReplyGate(gate)
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push(&self, outcome: Result<ChatReply, BackendError>, gate: Option<Arc<Semaphore>>) {
        self.script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(ScriptedReply { outcome, gate });
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn reply(&self, request: ChatRequest) -> Result<ChatReply, BackendError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        let next = self
            .script
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        let Some(scripted) = next else {
            return Err(BackendError::Status(StatusCode::SERVICE_UNAVAILABLE));
        };

        if let Some(gate) = scripted.gate {
            // A closed semaphore only happens on drop; treat it as released.
            let _permit = gate.acquire().await;
        }
        scripted.outcome
    }
}

//! Chat widget state machine.
//!
//! ```text
//!            open                 send (valid)
//!  Closed ─────────▶ Open-Idle ─────────────────▶ Open-Pending
//!    ▲                 │  ▲                            │
//!    │     close       │  └──── reply settles ─────────┘
//!    └─────────────────┴──────── close ────────────────┘
//! ```
//!
//! At most one request is in flight. The slot holding its task handle is the
//! busy flag; it is checked and filled synchronously inside [`ChatWidget::send`]
//! before anything is awaited. Closing never cancels the request: its reply is
//! still appended when it settles.

use std::sync::Arc;

use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, warn};

use crate::backend::{BackendError, ChatBackend, ChatReply, ChatRequest};
use crate::config::{Config, QuickAction};
use crate::message::{Conversation, Message};
use crate::signal::{PageSignal, SignalSubscription};

type ReplyTask = JoinHandle<Result<ChatReply, BackendError>>;

/// Visible state of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    /// Hidden. A request may still be in flight.
    Closed,
    /// Visible, ready to send.
    OpenIdle,
    /// Visible, waiting for a reply.
    OpenPending,
}

/// Result of a [`ChatWidget::send`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// The user message was appended and the request dispatched.
    Accepted,
    /// Text was empty after trimming; nothing happened.
    Empty,
    /// A request is already in flight; nothing happened.
    Busy,
}

impl SendOutcome {
    /// Whether the send went through.
    pub fn is_accepted(self) -> bool {
        self == Self::Accepted
    }
}

/// The chat widget: conversation, visibility and the single in-flight request.
pub struct ChatWidget {
    backend: Arc<dyn ChatBackend>,
    conversation: Conversation,
    open: bool,
    in_flight: Option<ReplyTask>,
    fallback: String,
    quick_actions: Vec<QuickAction>,
    signals: Option<SignalSubscription>,
}

impl std::fmt::Debug for ChatWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatWidget")
            .field("state", &self.state())
            .field("messages", &self.conversation.len())
            .finish_non_exhaustive()
    }
}

impl ChatWidget {
    /// Create a closed widget whose conversation holds the configured greeting.
    pub fn new(backend: Arc<dyn ChatBackend>, config: &Config) -> Self {
        Self {
            backend,
            conversation: Conversation::seeded(config.greeting.clone()),
            open: false,
            in_flight: None,
            fallback: config.fallback.clone(),
            quick_actions: config.quick_actions.clone(),
            signals: None,
        }
    }

    /// Listen for page signals (see [`ChatWidget::poll_signals`]).
    #[must_use]
    pub fn with_signals(mut self, subscription: SignalSubscription) -> Self {
        self.signals = Some(subscription);
        self
    }

    /// Current visible state.
    pub fn state(&self) -> WidgetState {
        match (self.open, self.is_busy()) {
            (false, _) => WidgetState::Closed,
            (true, false) => WidgetState::OpenIdle,
            (true, true) => WidgetState::OpenPending,
        }
    }

    /// Whether the widget is visible.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether a request is in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The conversation so far.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Configured quick actions.
    pub fn quick_actions(&self) -> &[QuickAction] {
        &self.quick_actions
    }

    /// Show the widget. Conversation state is untouched.
    pub fn open(&mut self) {
        self.open = true;
    }

    /// Hide the widget. An in-flight request keeps running.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Submit `text` as a user message.
    ///
    /// Appends the user message and dispatches the backend call before
    /// returning; the reply is applied later by [`ChatWidget::poll_reply`] or
    /// [`ChatWidget::settle`]. Must be called inside a tokio runtime.
    ///
    /// Callers own the input buffer and should clear it when this returns
    /// [`SendOutcome::Accepted`].
    pub fn send(&mut self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Empty;
        }
        if self.is_busy() {
            debug!("Send ignored, request already in flight");
            return SendOutcome::Busy;
        }

        let request = ChatRequest {
            message: text.to_string(),
            conversation_history: self.conversation.history(),
            use_rag: true,
        };
        self.conversation.push(Message::user(text));

        let backend = Arc::clone(&self.backend);
        self.in_flight = Some(tokio::spawn(async move { backend.reply(request).await }));
        SendOutcome::Accepted
    }

    /// Send the query of the quick action at `index`.
    ///
    /// Returns [`SendOutcome::Empty`] if there is no such action.
    pub fn trigger_quick_action(&mut self, index: usize) -> SendOutcome {
        match self.quick_actions.get(index) {
            Some(action) => {
                let query = action.query.clone();
                self.send(&query)
            }
            None => SendOutcome::Empty,
        }
    }

    /// Apply the reply if the in-flight request has finished.
    ///
    /// Never waits on an unfinished request. Returns `true` if a message was
    /// appended.
    pub async fn poll_reply(&mut self) -> bool {
        if !self.in_flight.as_ref().is_some_and(JoinHandle::is_finished) {
            return false;
        }
        self.settle().await
    }

    /// Wait for the in-flight request, if any, and apply its reply.
    ///
    /// Returns `true` if a message was appended.
    pub async fn settle(&mut self) -> bool {
        let Some(task) = self.in_flight.take() else {
            return false;
        };
        let joined = task.await;
        self.apply_reply(joined);
        true
    }

    /// Open the widget if an [`PageSignal::OpenChat`] arrived since the last call.
    ///
    /// Returns `true` if the widget was opened by a signal.
    pub fn poll_signals(&mut self) -> bool {
        let Some(subscription) = self.signals.as_mut() else {
            return false;
        };
        let opened = subscription
            .drain()
            .into_iter()
            .any(|signal| signal == PageSignal::OpenChat);
        if opened {
            debug!("Opening chat from page signal");
            self.open();
        }
        opened
    }

    fn apply_reply(&mut self, joined: Result<Result<ChatReply, BackendError>, JoinError>) {
        let outcome = joined.unwrap_or_else(|e| Err(BackendError::TaskFailed(e.to_string())));
        let content = match outcome {
            Ok(reply) => reply.response,
            Err(e) => {
                warn!(error = %e, "Chat request failed, showing fallback");
                self.fallback.clone()
            }
        };
        self.conversation.push(Message::assistant(content));
    }
}

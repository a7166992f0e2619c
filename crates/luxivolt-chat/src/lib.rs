//! luxivolt-chat: Headless engine for the Luxivolt chat assistant
//!
//! This crate provides the chat widget's interaction model, including:
//! - Message and conversation types
//! - The widget state machine with its single in-flight request
//! - The HTTP client for the chat backend
//! - Page-wide signals for opening the chat
//! - Configuration

pub mod backend;
pub mod config;
pub mod message;
pub mod signal;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod widget;

// Re-export commonly used types
pub use backend::{BackendError, ChatBackend, ChatReply, ChatRequest, HealthReport, HttpBackend};
pub use config::{Config, ConfigError, QuickAction, CONFIG_PATH, ENDPOINT_ENV};
pub use message::{Conversation, HistoryEntry, Message, Role};
pub use signal::{PageSignal, SignalBus, SignalSubscription};
pub use widget::{ChatWidget, SendOutcome, WidgetState};

/// Returns the engine version.
pub fn engine_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_version() {
        let version = engine_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}

//! Message and conversation types for the chat widget.
//!
//! A [`Conversation`] is append-only: messages are pushed in insertion order
//! and never edited, reordered or removed for the lifetime of the widget.

use chrono::Local;
use serde::{Deserialize, Serialize};

/// Display format for message timestamps (hour and minute, local time).
pub const TIMESTAMP_FORMAT: &str = "%H:%M";

/// Role of a message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Message typed by the visitor.
    User,
    /// Reply from the assistant (backend reply, greeting or fallback).
    Assistant,
}

/// A single message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message author.
    pub role: Role,
    /// Message content (may contain Markdown).
    pub content: String,
    /// Display-formatted creation time.
    pub timestamp: String,
}

impl Message {
    /// Create a new user message stamped with the current local time.
    pub fn user(content: impl Into<String>) -> Self {
        Self::with_timestamp(Role::User, content, now_display())
    }

    /// Create a new assistant message stamped with the current local time.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::with_timestamp(Role::Assistant, content, now_display())
    }

    /// Create a message with an explicit display timestamp.
    pub fn with_timestamp(
        role: Role,
        content: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Project this message onto the wire shape sent to the backend.
    pub fn to_history_entry(&self) -> HistoryEntry {
        HistoryEntry {
            role: self.role,
            content: self.content.clone(),
        }
    }
}

/// Current local time formatted for display.
pub fn now_display() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// A `{role, content}` pair as sent in `conversation_history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Role of the message author.
    pub role: Role,
    /// Message content.
    pub content: String,
}

/// Ordered, append-only sequence of messages.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Create a conversation seeded with an assistant greeting.
    pub fn seeded(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::assistant(greeting)],
        }
    }

    /// Append a message at the end.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the conversation has no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recent message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Iterate over messages in insertion order.
    ///
    /// Each call starts a fresh pass, so renderers can walk the conversation
    /// again on every frame.
    pub fn iter(&self) -> std::slice::Iter<'_, Message> {
        self.messages.iter()
    }

    /// Role and content of every message, timestamps dropped.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.messages.iter().map(Message::to_history_entry).collect()
    }
}

impl<'a> IntoIterator for &'a Conversation {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_creation() {
        let user_msg = Message::user("Merhaba");
        assert_eq!(user_msg.role, Role::User);
        assert_eq!(user_msg.content, "Merhaba");

        let assistant_msg = Message::assistant("Size nasıl yardımcı olabilirim?");
        assert_eq!(assistant_msg.role, Role::Assistant);
    }

    #[test]
    fn test_timestamp_is_hour_minute() {
        let msg = Message::user("x");
        assert_eq!(msg.timestamp.len(), 5);
        assert_eq!(msg.timestamp.as_bytes()[2], b':');
    }

    #[test]
    fn test_seeded_conversation_has_greeting() {
        let conv = Conversation::seeded("Selam!");
        assert_eq!(conv.len(), 1);
        let first = conv.last().unwrap();
        assert_eq!(first.role, Role::Assistant);
        assert_eq!(first.content, "Selam!");
    }

    #[test]
    fn test_push_preserves_insertion_order() {
        let mut conv = Conversation::default();
        conv.push(Message::user("a"));
        conv.push(Message::user("a"));
        conv.push(Message::assistant("b"));

        let contents: Vec<&str> = conv.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["a", "a", "b"]);
    }

    #[test]
    fn test_iter_is_restartable() {
        let conv = Conversation::seeded("hi");
        assert_eq!(conv.iter().count(), 1);
        assert_eq!(conv.iter().count(), 1);
        assert_eq!((&conv).into_iter().count(), 1);
    }

    #[test]
    fn test_history_drops_timestamps() {
        let mut conv = Conversation::default();
        conv.push(Message::with_timestamp(Role::User, "soru", "10:15"));
        conv.push(Message::with_timestamp(Role::Assistant, "cevap", "10:16"));

        let json = serde_json::to_value(conv.history()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"role": "user", "content": "soru"},
                {"role": "assistant", "content": "cevap"}
            ])
        );
    }
}

//! Append-only conversation log.

use crate::types::{Message, Role};

/// Ordered list of conversation turns.
///
/// Strictly append-only: no message is ever edited or deleted. Ordering is
/// append order; timestamps are informational.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the log.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Snapshot the log for persistence.
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    /// Rebuild a log from a persisted snapshot.
    pub fn from_snapshot(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Count of user turns, useful for generating stable message ids after
    /// a restart.
    pub fn user_turns(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role == Role::User)
            .count()
    }
}

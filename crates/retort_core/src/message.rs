//! Message types for the request conversation context.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A message in the chat-completion format.
///
/// Immutable once constructed; an ordered sequence of these forms the
/// conversation context of a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender
    pub role: Role,
    /// Message content
    pub content: String,
}

impl ChatMessage {
    /// Creates a new message with the given role and content.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

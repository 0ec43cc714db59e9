//! Reply records handed to display and persistence collaborators.

use serde::{Deserialize, Serialize};

/// Lifecycle of one reply card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyStatus {
    /// No content emitted yet
    Pending,
    /// Content is still arriving
    Streaming,
    /// Content is final
    Complete,
}

/// A single reply with an explicit status tag and one content accumulator,
/// rather than structurally distinct in-progress/finalized shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    /// Accumulated content
    pub content: String,
    /// Current lifecycle state
    pub status: ReplyStatus,
}

impl Reply {
    /// A reply that has not started emitting.
    pub fn pending() -> Self {
        Self {
            content: String::new(),
            status: ReplyStatus::Pending,
        }
    }

    /// A finalized reply.
    pub fn complete(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            status: ReplyStatus::Complete,
        }
    }

    /// Appends an increment, moving a pending reply into streaming state.
    pub fn push_fragment(&mut self, fragment: &str) {
        if self.status == ReplyStatus::Pending {
            self.status = ReplyStatus::Streaming;
        }
        self.content.push_str(fragment);
    }

    /// Marks the reply final.
    pub fn finish(&mut self) {
        self.status = ReplyStatus::Complete;
    }

    /// True once the reply is final.
    pub fn is_complete(&self) -> bool {
        self.status == ReplyStatus::Complete
    }
}

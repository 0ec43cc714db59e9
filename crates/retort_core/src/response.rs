//! Non-streaming chat completion response.

use crate::ChatMessage;
use serde::Deserialize;

/// A choice in the completion response.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// Position of this choice in the response
    #[serde(default)]
    pub index: u32,
    /// The generated message
    pub message: ChatMessage,
    /// Reason for finishing
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage statistics.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatUsage {
    /// Tokens in the prompt
    #[serde(default)]
    pub prompt_tokens: Option<usize>,
    /// Tokens in the completion
    #[serde(default)]
    pub completion_tokens: Option<usize>,
    /// Total tokens
    #[serde(default)]
    pub total_tokens: Option<usize>,
}

/// Full chat completion response body.
///
/// Only `choices[0].message.content` is consumed by the pipeline; the
/// remaining fields are tolerated with defaults so a provider omitting
/// them does not break parsing.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Completion id
    #[serde(default)]
    pub id: Option<String>,
    /// Creation timestamp (seconds since epoch)
    #[serde(default)]
    pub created: Option<u64>,
    /// Model that produced the completion
    #[serde(default)]
    pub model: Option<String>,
    /// Response choices
    pub choices: Vec<ChatChoice>,
    /// Token usage
    #[serde(default)]
    pub usage: Option<ChatUsage>,
}

//! Chat completion request.

use crate::ChatMessage;
use derive_builder::Builder;
use derive_getters::Getters;
use serde::Serialize;

/// Default output-token ceiling for a generation request.
pub const MAX_TOKENS: u32 = 1000;

/// Default sampling temperature for a generation request.
pub const TEMPERATURE: f32 = 0.8;

/// Chat completion request, constructed fresh per call.
#[derive(Debug, Clone, Serialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatRequest {
    /// Model identifier
    model: String,
    /// Conversation messages
    messages: Vec<ChatMessage>,
    /// Enable streaming
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
    /// Maximum tokens to generate
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    /// Sampling temperature
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl ChatRequest {
    /// Creates a new builder for ChatRequest.
    pub fn builder() -> ChatRequestBuilder {
        ChatRequestBuilder::default()
    }
}

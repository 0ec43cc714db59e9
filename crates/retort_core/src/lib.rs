//! Core data types for the Retort reply-generation library.
//!
//! This crate provides the chat-completion wire types, the prompt
//! construction helpers, and the reply records shared across the pipeline.

mod message;
pub mod prompt;
mod reply;
mod request;
mod response;
mod role;
mod stream;

pub use message::ChatMessage;
pub use prompt::{DEFAULT_INTENSITY, conversation, intensity_label, system_prompt, user_message};
pub use reply::{Reply, ReplyStatus};
pub use request::{ChatRequest, ChatRequestBuilder, MAX_TOKENS, TEMPERATURE};
pub use response::{ChatChoice, ChatResponse, ChatUsage};
pub use role::Role;
pub use stream::{DONE_SENTINEL, StreamChoice, StreamChunk, StreamDelta};

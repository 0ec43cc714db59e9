//! Chat-completion client: configuration, rebuttal generation, SSE
//! decoding and reply splitting.
//!
//! The entry point is [`RebuttalClient`], which owns the HTTP client,
//! the reply cache and the interval limiter and exposes full-response
//! and streaming generation over an OpenAI-compatible endpoint.

mod client;
mod config;
mod handler;
pub mod parse;
pub mod sse;
pub mod typing;

pub use client::{CHAR_DELAY, REPLY_DELAY, RebuttalClient};
pub use config::ApiConfig;
pub use handler::StreamHandler;
pub use parse::{MAX_REPLIES, parse_replies};
pub use sse::{SseDecoder, SseEvent};

//! Error types for the Retort reply-generation library.

mod client;
mod config;

pub use client::ClientError;
pub use config::ConfigError;

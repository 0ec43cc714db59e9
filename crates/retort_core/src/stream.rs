//! Streaming chat completion chunks.

use crate::Role;
use serde::Deserialize;

/// Terminal marker signaling stream completion. Arrives as a bare `data:`
/// payload, not as a structured chunk.
pub const DONE_SENTINEL: &str = "[DONE]";

/// An incremental content fragment carried by one streaming chunk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamDelta {
    /// Role, present on the first chunk of a stream
    #[serde(default)]
    pub role: Option<Role>,
    /// Incremental content fragment
    #[serde(default)]
    pub content: Option<String>,
}

/// A choice-like delta inside a streaming chunk.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamChoice {
    /// Position of this choice
    #[serde(default)]
    pub index: u32,
    /// The incremental delta
    #[serde(default)]
    pub delta: StreamDelta,
    /// Reason for finishing, present on the last structured chunk
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// One structured frame of a streaming response.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamChunk {
    /// Ordered deltas; only the first is consumed
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
}

impl StreamChunk {
    /// Content of the first choice's delta, if present and non-empty.
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.delta.content.as_deref())
            .filter(|content| !content.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_content_reads_first_delta() {
        let chunk: StreamChunk =
            serde_json::from_str(r#"{"choices":[{"delta":{"content":"hi"}}]}"#).unwrap();
        assert_eq!(chunk.content(), Some("hi"));
    }

    #[test]
    fn chunk_content_skips_empty_fragment() {
        let chunk: StreamChunk =
            serde_json::from_str(r#"{"choices":[{"delta":{"content":""}}]}"#).unwrap();
        assert_eq!(chunk.content(), None);
    }

    #[test]
    fn chunk_tolerates_missing_delta_fields() {
        let chunk: StreamChunk =
            serde_json::from_str(r#"{"choices":[{"index":0,"finish_reason":"stop","delta":{}}]}"#)
                .unwrap();
        assert_eq!(chunk.content(), None);
        assert_eq!(chunk.choices[0].finish_reason.as_deref(), Some("stop"));
    }
}

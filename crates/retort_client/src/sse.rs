//! SSE stream decoder.
//!
//! A line-oriented state machine over the incoming byte stream. Bytes are
//! buffered until a newline completes a line; `data: ` lines are candidate
//! events, the `[DONE]` sentinel terminates the stream, and anything that
//! fails to parse as a structured chunk is discarded without aborting the
//! stream (keep-alive comments and malformed frames are tolerated).
//!
//! The decoder accumulates the full completion text as it goes; a stream
//! that closes without ever emitting the sentinel still finalizes with
//! whatever was accumulated.

use retort_core::{DONE_SENTINEL, StreamChunk};
use tracing::debug;

/// Prefix marking an SSE data line.
pub const DATA_PREFIX: &str = "data: ";

/// One decoded event.
#[derive(Debug, Clone, PartialEq)]
pub enum SseEvent {
    /// An incremental content fragment
    Delta(String),
    /// The terminal sentinel was observed
    Done,
}

/// Incremental decoder for an SSE completion stream.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    text: String,
    done: bool,
}

impl SseDecoder {
    /// Creates an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one chunk of bytes, returning the events completed by it.
    ///
    /// Chunk boundaries need not align with line or UTF-8 boundaries; the
    /// trailing incomplete fragment is retained until more bytes arrive.
    /// Once the sentinel has been observed, further input is ignored.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        let mut events = Vec::new();
        if self.done {
            return events;
        }

        self.buffer.extend_from_slice(chunk);

        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let line = String::from_utf8_lossy(&line);
            let line = line.trim_end_matches(['\n', '\r']);

            let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
                // Blank separators, comments and other SSE fields.
                continue;
            };

            if payload.trim() == DONE_SENTINEL {
                self.done = true;
                events.push(SseEvent::Done);
                break;
            }

            match serde_json::from_str::<StreamChunk>(payload) {
                Ok(chunk) => {
                    if let Some(content) = chunk.content() {
                        self.text.push_str(content);
                        events.push(SseEvent::Delta(content.to_string()));
                    }
                }
                Err(error) => {
                    debug!(%error, "discarding malformed SSE data line");
                }
            }
        }

        events
    }

    /// True once the terminal sentinel has been observed.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// The full text accumulated so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the decoder, yielding the accumulated full text.
    pub fn into_text(self) -> String {
        self.text
    }
}

//! Simulated character-by-character emission for cache hits.
//!
//! Replays an already-known reply list through a [`StreamHandler`] with the
//! same cadence a live stream would show: a short pause per character and a
//! longer pause between replies. The cancellation token is checked before
//! every emission so an abandoned view stops consuming the handler.

use crate::StreamHandler;
use retort_core::Reply;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

/// Emits each reply character by character through the handler.
///
/// Returns the reply cards in their final state: all `Complete` when the
/// emission ran to the end, the in-flight card left `Streaming` (with the
/// characters emitted so far) when `cancel` fired first.
pub async fn type_out<H: StreamHandler>(
    handler: &mut H,
    replies: &[String],
    char_delay: Duration,
    reply_delay: Duration,
    cancel: &CancellationToken,
) -> Vec<Reply> {
    let mut cards = Vec::with_capacity(replies.len());

    for (index, content) in replies.iter().enumerate() {
        let mut card = Reply::pending();

        for ch in content.chars() {
            if cancel.is_cancelled() {
                cards.push(card);
                return cards;
            }
            let mut buf = [0u8; 4];
            let fragment = ch.encode_utf8(&mut buf);
            handler.on_message(fragment);
            card.push_fragment(fragment);
            sleep(char_delay).await;
        }

        card.finish();
        cards.push(card);

        if index + 1 < replies.len() {
            sleep(reply_delay).await;
        }
    }

    cards
}

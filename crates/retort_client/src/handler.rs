//! Streaming emission contract.

use retort_error::ClientError;

/// Receiver for the incremental emission of one streaming generation.
///
/// For every call, `on_message` fires zero or more times with content
/// increments, then exactly one of `on_complete` or `on_error` fires —
/// unless the call is cancelled, in which case emission simply stops.
/// Errors after streaming has started are delivered here, never raised
/// past the point streaming began.
pub trait StreamHandler: Send {
    /// One incremental content fragment, in arrival order.
    fn on_message(&mut self, delta: &str);

    /// The stream finished; `full_text` is the accumulated completion.
    fn on_complete(&mut self, full_text: &str);

    /// The call failed; `error` is final and user-displayable.
    fn on_error(&mut self, error: ClientError);
}

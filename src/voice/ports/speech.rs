//! Speech capture port.

use async_trait::async_trait;

/// Platform speech capability delivering finalized utterance segments.
///
/// Implementations wrap whatever continuous, interim-enabled recognition
/// the platform exposes. Only finalized segments are delivered; interim
/// hypotheses never reach the pipeline. A platform without speech support
/// reports unavailability and the user types instead.
#[async_trait]
pub trait SpeechSource: Send {
    /// Whether the platform exposes speech capture at all.
    fn is_available(&self) -> bool;

    /// Waits for the next finalized utterance segment. Returns `None` when
    /// the platform stops delivering (capture device closed, recognition
    /// session ended).
    async fn next_segment(&mut self) -> Option<String>;
}

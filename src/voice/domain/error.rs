//! Error types for the voice capture flow.

use crate::view::domain::TaskDomainError;
use crate::view::ports::BackendError;
use crate::voice::services::CaptureState;
use thiserror::Error;

/// Errors surfaced by the voice capture pipeline.
///
/// Parsing-collaborator rejections ([`VoiceError::Parse`]) are deliberately
/// distinct from transport failures ([`VoiceError::Backend`]): the
/// transcript is never lost either way, but the user can retry a parse
/// without re-recording, whereas a transport failure suggests waiting.
#[derive(Debug, Clone, Error)]
pub enum VoiceError {
    /// The platform exposes no speech capability; the typed-input path is
    /// still available.
    #[error("speech capture is not available on this platform")]
    CaptureUnavailable,

    /// The requested action is not valid in the pipeline's current state.
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        /// The rejected action, e.g. `"append a segment"`.
        action: &'static str,
        /// The state the pipeline was in.
        state: CaptureState,
    },

    /// The transcript is too short to be worth parsing. Local validation;
    /// never reaches the network.
    #[error("transcript must be at least {minimum} characters, got {actual}")]
    TranscriptTooShort {
        /// Required minimum of trimmed characters.
        minimum: usize,
        /// Trimmed characters actually present.
        actual: usize,
    },

    /// The parsing collaborator rejected the transcript. The transcript is
    /// preserved and parsing may be retried.
    #[error("voice parsing failed: {0}")]
    Parse(String),

    /// A draft field failed local validation before submission.
    #[error(transparent)]
    Validation(#[from] TaskDomainError),

    /// Transport or server failure talking to the backend.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The view controller could not be driven at all (its state lock was
    /// poisoned).
    #[error("view controller unavailable: {0}")]
    Controller(String),
}

//! The voice capture pipeline state machine.

mod pipeline;

pub use pipeline::{CaptureState, VoicePipeline, VoiceSubmission};

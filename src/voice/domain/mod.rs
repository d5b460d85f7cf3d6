//! Domain model for the voice capture flow.

mod draft;
mod error;

pub use draft::TaskDraft;
pub use error::VoiceError;

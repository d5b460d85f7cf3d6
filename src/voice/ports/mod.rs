//! Port contracts for the voice capture flow.

pub mod speech;

pub use speech::SpeechSource;

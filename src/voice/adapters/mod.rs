//! Adapter implementations of the speech capture port.

pub mod scripted;

pub use scripted::ScriptedSpeechSource;

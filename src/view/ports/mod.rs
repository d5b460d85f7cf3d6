//! Port contracts for the synchronized task view.
//!
//! Ports define infrastructure-agnostic interfaces used by view services.

pub mod backend;

pub use backend::{BackendError, BackendResult, ParsedVoice, TaskBackend, TaskPage};

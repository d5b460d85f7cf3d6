//! Error types for view domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
///
/// These are local validation failures: they block the action before any
/// network call is made.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is empty after trimming.
    #[error("task identifier must not be empty")]
    EmptyTaskId,

    /// The title is shorter than the required minimum after trimming.
    #[error("title must be at least {minimum} characters, got {actual}")]
    TitleTooShort {
        /// Required minimum length.
        minimum: usize,
        /// Trimmed length actually supplied.
        actual: usize,
    },

    /// The description is shorter than the required minimum after trimming.
    #[error("description must be at least {minimum} characters, got {actual}")]
    DescriptionTooShort {
        /// Required minimum length.
        minimum: usize,
        /// Trimmed length actually supplied.
        actual: usize,
    },

    /// The voice transcript exceeds the storable maximum.
    #[error("transcript must be at most {maximum} characters, got {actual}")]
    TranscriptTooLong {
        /// Allowed maximum length.
        maximum: usize,
        /// Length actually supplied.
        actual: usize,
    },
}

/// Error returned while parsing workflow states from wire values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseStatusError(pub String);

/// Error returned while parsing priorities from wire values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing due dates from either encoding.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid due date '{value}', expected {expected}")]
pub struct ParseDueDateError {
    /// The rejected input.
    pub value: String,
    /// Human-readable description of the expected encoding.
    pub expected: &'static str,
}

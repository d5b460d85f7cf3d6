//! Backend port for task retrieval, mutation, and voice parsing.

use crate::view::domain::{BoardColumns, NewTask, PageInfo, Task, TaskId, TaskPatch, TaskQuery};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// One page of view data plus its authoritative pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskPage<T> {
    /// Page payload: grouped columns for the board view, a flat sequence
    /// for the list view.
    pub data: T,
    /// Pagination metadata consumed verbatim from the response.
    pub pagination: PageInfo,
}

/// Best-effort structured decomposition of a voice transcript.
///
/// Every field is optional; the parsing collaborator omits whatever it
/// could not infer. `priority` and `due_date` arrive as raw strings because
/// the collaborator guesses, and the guess may be malformed (the legacy
/// service is known to emit the literal string `"null"` for a missing
/// date). Draft building treats unusable guesses as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedVoice {
    /// Suggested title.
    #[serde(default)]
    pub title: Option<String>,
    /// Suggested description.
    #[serde(default)]
    pub description: Option<String>,
    /// Suggested priority as a raw wire string.
    #[serde(default)]
    pub priority: Option<String>,
    /// Suggested due date as a raw `DD-MM-YYYY` string.
    #[serde(default)]
    pub due_date: Option<String>,
}

/// Remote task backend contract.
///
/// View fetches and mutations, plus the voice-parsing collaborator, all
/// live behind this port. Mutations are idempotent calls identified by task
/// id; callers are expected to refresh the view after a mutation settles
/// rather than patch local state optimistically.
#[async_trait]
pub trait TaskBackend: Send + Sync {
    /// Fetches one page of tasks grouped by status for the board view.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure, a non-2xx response,
    /// or a malformed body.
    async fn board_view(
        &self,
        query: &TaskQuery,
        page: u32,
        limit: u32,
    ) -> BackendResult<TaskPage<BoardColumns>>;

    /// Fetches one flat page of tasks for the list view.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] on transport failure, a non-2xx response,
    /// or a malformed body.
    async fn list_view(
        &self,
        query: &TaskQuery,
        page: u32,
        limit: u32,
    ) -> BackendResult<TaskPage<Vec<Task>>>;

    /// Creates a task and returns the server-assigned record.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Rejected`] when the backend refuses the
    /// payload (validation error payload), or a transport/decode error.
    async fn create_task(&self, payload: &NewTask) -> BackendResult<Task>;

    /// Applies a partial update to the task with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Rejected`] when the task is unknown or the
    /// patch is refused, or a transport/decode error.
    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> BackendResult<Task>;

    /// Deletes the task with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Rejected`] when the task is unknown, or a
    /// transport error.
    async fn delete_task(&self, id: &TaskId) -> BackendResult<()>;

    /// Sends a transcript to the parsing collaborator for a best-effort
    /// structured guess.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Rejected`] when the collaborator cannot
    /// parse the transcript, or a transport/decode error.
    async fn parse_voice(&self, transcript: &str) -> BackendResult<ParsedVoice>;
}

/// Errors returned by backend implementations.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The backend answered with a non-2xx status.
    #[error("backend rejected the request ({status}): {message}")]
    Rejected {
        /// HTTP status code of the response.
        status: u16,
        /// Error message from the response payload, or a generic fallback.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("malformed response body: {0}")]
    Decode(Arc<dyn std::error::Error + Send + Sync>),
}

impl BackendError {
    /// Wraps a transport-level failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Wraps a body-decoding failure.
    pub fn decode(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Decode(Arc::new(err))
    }

    /// Builds a rejection from a status code and payload message.
    #[must_use]
    pub const fn rejected(status: u16, message: String) -> Self {
        Self::Rejected { status, message }
    }
}

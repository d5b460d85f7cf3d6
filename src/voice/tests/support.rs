//! Test doubles for voice pipeline tests.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use crate::view::adapters::memory::InMemoryTaskBackend;
use crate::view::domain::{BoardColumns, NewTask, Task, TaskId, TaskPatch, TaskQuery};
use crate::view::ports::{BackendError, BackendResult, ParsedVoice, TaskBackend, TaskPage};
use async_trait::async_trait;
use std::sync::Mutex;

/// Backend double delegating to [`InMemoryTaskBackend`] while letting tests
/// stage one-shot failures on the parse and create calls.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    inner: InMemoryTaskBackend,
    parse_failure: Mutex<Option<BackendError>>,
    create_failure: Mutex<Option<BackendError>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn inner(&self) -> &InMemoryTaskBackend {
        &self.inner
    }

    /// Stages a failure consumed by the next `parse_voice` call.
    pub fn fail_next_parse(&self, err: BackendError) {
        *self.parse_failure.lock().expect("parse failure lock") = Some(err);
    }

    /// Stages a failure consumed by the next `create_task` call.
    pub fn fail_next_create(&self, err: BackendError) {
        *self.create_failure.lock().expect("create failure lock") = Some(err);
    }
}

#[async_trait]
impl TaskBackend for ScriptedBackend {
    async fn board_view(
        &self,
        query: &TaskQuery,
        page: u32,
        limit: u32,
    ) -> BackendResult<TaskPage<BoardColumns>> {
        self.inner.board_view(query, page, limit).await
    }

    async fn list_view(
        &self,
        query: &TaskQuery,
        page: u32,
        limit: u32,
    ) -> BackendResult<TaskPage<Vec<Task>>> {
        self.inner.list_view(query, page, limit).await
    }

    async fn create_task(&self, payload: &NewTask) -> BackendResult<Task> {
        let staged = self.create_failure.lock().expect("create failure lock").take();
        if let Some(err) = staged {
            return Err(err);
        }
        self.inner.create_task(payload).await
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> BackendResult<Task> {
        self.inner.update_task(id, patch).await
    }

    async fn delete_task(&self, id: &TaskId) -> BackendResult<()> {
        self.inner.delete_task(id).await
    }

    async fn parse_voice(&self, transcript: &str) -> BackendResult<ParsedVoice> {
        let staged = self.parse_failure.lock().expect("parse failure lock").take();
        if let Some(err) = staged {
            return Err(err);
        }
        self.inner.parse_voice(transcript).await
    }
}

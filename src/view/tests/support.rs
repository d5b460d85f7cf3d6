//! Shared fixtures and test doubles for view unit tests.

#![expect(
    clippy::expect_used,
    reason = "Test code uses expect for assertion clarity"
)]

use crate::view::adapters::memory::InMemoryTaskBackend;
use crate::view::domain::{BoardColumns, NewTask, Task, TaskId, TaskPatch, TaskQuery};
use crate::view::ports::{BackendError, BackendResult, ParsedVoice, TaskBackend, TaskPage};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// Builds a valid create payload from a title.
pub fn payload(title: &str) -> NewTask {
    NewTask::new(title, format!("{title}, described in full detail"))
        .expect("fixture payload should satisfy validation")
}

/// Backend double delegating to [`InMemoryTaskBackend`] while letting tests
/// delay, fail, and observe fetch calls.
#[derive(Debug, Default)]
pub struct ProgrammableBackend {
    inner: InMemoryTaskBackend,
    fetch_delays: Mutex<VecDeque<Duration>>,
    failing_fetches: AtomicU32,
    fetch_calls: AtomicU32,
    last_fetch: Mutex<Option<(TaskQuery, u32)>>,
}

impl ProgrammableBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// The wrapped store, for seeding and direct inspection.
    pub const fn inner(&self) -> &InMemoryTaskBackend {
        &self.inner
    }

    /// Queues a delay consumed by the next fetch call.
    pub fn push_fetch_delay(&self, delay: Duration) {
        self.fetch_delays
            .lock()
            .expect("delay queue lock")
            .push_back(delay);
    }

    /// Makes the next `count` fetch calls fail with a 500 rejection.
    pub fn fail_next_fetches(&self, count: u32) {
        self.failing_fetches.store(count, Ordering::SeqCst);
    }

    /// Number of fetch calls (board or list) observed so far.
    pub fn fetch_calls(&self) -> u32 {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    /// Query and page of the most recent fetch call.
    pub fn last_fetch(&self) -> Option<(TaskQuery, u32)> {
        self.last_fetch.lock().expect("last fetch lock").clone()
    }

    async fn before_fetch(&self, query: &TaskQuery, page: u32) -> BackendResult<()> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_fetch.lock().expect("last fetch lock") = Some((query.clone(), page));
        // The failure is claimed when the call is issued; a queued delay only
        // postpones the response.
        let remaining = self.failing_fetches.load(Ordering::SeqCst);
        let fails = remaining > 0;
        if fails {
            self.failing_fetches.store(remaining - 1, Ordering::SeqCst);
        }
        let delay = self.fetch_delays.lock().expect("delay queue lock").pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if fails {
            return Err(BackendError::rejected(
                500,
                "injected fetch failure".to_owned(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl TaskBackend for ProgrammableBackend {
    async fn board_view(
        &self,
        query: &TaskQuery,
        page: u32,
        limit: u32,
    ) -> BackendResult<TaskPage<BoardColumns>> {
        self.before_fetch(query, page).await?;
        self.inner.board_view(query, page, limit).await
    }

    async fn list_view(
        &self,
        query: &TaskQuery,
        page: u32,
        limit: u32,
    ) -> BackendResult<TaskPage<Vec<Task>>> {
        self.before_fetch(query, page).await?;
        self.inner.list_view(query, page, limit).await
    }

    async fn create_task(&self, new_task: &NewTask) -> BackendResult<Task> {
        self.inner.create_task(new_task).await
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> BackendResult<Task> {
        self.inner.update_task(id, patch).await
    }

    async fn delete_task(&self, id: &TaskId) -> BackendResult<()> {
        self.inner.delete_task(id).await
    }

    async fn parse_voice(&self, transcript: &str) -> BackendResult<ParsedVoice> {
        self.inner.parse_voice(transcript).await
    }
}

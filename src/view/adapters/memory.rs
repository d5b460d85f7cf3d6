//! In-memory task backend implementing the full view contract.
//!
//! Behaves like the real server: filtering, case-insensitive search,
//! pagination over the filtered sequence, board grouping, and id
//! assignment. Used by tests and headless demos.

use crate::view::domain::{BoardColumns, NewTask, PageInfo, Task, TaskId, TaskPatch, TaskQuery};
use crate::view::ports::{BackendError, BackendResult, ParsedVoice, TaskBackend, TaskPage};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Thread-safe in-memory task backend.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskBackend {
    state: Arc<RwLock<InMemoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    tasks: Vec<Task>,
    parse_reply: Option<ParsedVoice>,
}

impl InMemoryTaskBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the store with one task built from a create payload, returning
    /// the minted record.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the store lock is poisoned.
    pub fn seed(&self, payload: NewTask) -> BackendResult<Task> {
        let mut state = self.lock_write()?;
        let task = mint(payload);
        state.tasks.push(task.clone());
        Ok(task)
    }

    /// Scripts the reply returned by the voice-parsing endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the store lock is poisoned.
    pub fn set_parse_reply(&self, reply: ParsedVoice) -> BackendResult<()> {
        let mut state = self.lock_write()?;
        state.parse_reply = Some(reply);
        Ok(())
    }

    /// Number of stored tasks, across all pages and filters.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the store lock is poisoned.
    pub fn stored_count(&self) -> BackendResult<usize> {
        Ok(self.lock_read()?.tasks.len())
    }

    fn lock_read(&self) -> BackendResult<std::sync::RwLockReadGuard<'_, InMemoryState>> {
        self.state
            .read()
            .map_err(|err| BackendError::transport(std::io::Error::other(err.to_string())))
    }

    fn lock_write(&self) -> BackendResult<std::sync::RwLockWriteGuard<'_, InMemoryState>> {
        self.state
            .write()
            .map_err(|err| BackendError::transport(std::io::Error::other(err.to_string())))
    }
}

/// Assigns a fresh id to a create payload.
fn mint(payload: NewTask) -> Task {
    Task::from_create(TaskId::from_uuid(Uuid::new_v4()), payload)
}

/// Whether a task satisfies every set filter.
fn matches(task: &Task, query: &TaskQuery) -> bool {
    if query.status().is_some_and(|status| task.status() != status) {
        return false;
    }
    if query
        .priority()
        .is_some_and(|priority| task.priority() != priority)
    {
        return false;
    }
    if let Some(search) = query.search() {
        let needle = search.to_lowercase();
        let hit = task.title().to_lowercase().contains(&needle)
            || task.description().to_lowercase().contains(&needle);
        if !hit {
            return false;
        }
    }
    if query.due_date().is_some() && task.due_date() != query.due_date() {
        return false;
    }
    true
}

/// Cuts one 1-based page out of the filtered sequence and derives the
/// pagination metadata the real backend would report.
fn paginate(filtered: Vec<Task>, page: u32, limit: u32) -> BackendResult<(Vec<Task>, PageInfo)> {
    if page == 0 || limit == 0 {
        return Err(BackendError::rejected(
            400,
            "page and limit must be positive".to_owned(),
        ));
    }
    let limit_len = usize::try_from(limit).unwrap_or(usize::MAX);
    let total_pages_len = filtered.len().div_ceil(limit_len);
    let total_pages = u32::try_from(total_pages_len).unwrap_or(u32::MAX);
    let offset = usize::try_from(page)
        .unwrap_or(usize::MAX)
        .saturating_sub(1)
        .saturating_mul(limit_len);
    let slice: Vec<Task> = filtered.into_iter().skip(offset).take(limit_len).collect();
    let info = PageInfo {
        current_page: page,
        total_pages,
        has_next: page < total_pages,
        has_prev: page > 1 && total_pages > 0,
    };
    Ok((slice, info))
}

#[async_trait]
impl TaskBackend for InMemoryTaskBackend {
    async fn board_view(
        &self,
        query: &TaskQuery,
        page: u32,
        limit: u32,
    ) -> BackendResult<TaskPage<BoardColumns>> {
        let filtered: Vec<Task> = {
            let state = self.lock_read()?;
            state
                .tasks
                .iter()
                .filter(|task| matches(task, query))
                .cloned()
                .collect()
        };
        let (slice, pagination) = paginate(filtered, page, limit)?;
        Ok(TaskPage {
            data: BoardColumns::from_tasks(slice),
            pagination,
        })
    }

    async fn list_view(
        &self,
        query: &TaskQuery,
        page: u32,
        limit: u32,
    ) -> BackendResult<TaskPage<Vec<Task>>> {
        let filtered: Vec<Task> = {
            let state = self.lock_read()?;
            state
                .tasks
                .iter()
                .filter(|task| matches(task, query))
                .cloned()
                .collect()
        };
        let (slice, pagination) = paginate(filtered, page, limit)?;
        Ok(TaskPage {
            data: slice,
            pagination,
        })
    }

    async fn create_task(&self, payload: &NewTask) -> BackendResult<Task> {
        let mut state = self.lock_write()?;
        let task = mint(payload.clone());
        state.tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> BackendResult<Task> {
        let mut state = self.lock_write()?;
        let Some(task) = state.tasks.iter_mut().find(|task| task.id() == id) else {
            return Err(BackendError::rejected(404, format!("task not found: {id}")));
        };
        task.apply_patch(patch);
        Ok(task.clone())
    }

    async fn delete_task(&self, id: &TaskId) -> BackendResult<()> {
        let mut state = self.lock_write()?;
        let before = state.tasks.len();
        state.tasks.retain(|task| task.id() != id);
        if state.tasks.len() == before {
            return Err(BackendError::rejected(404, format!("task not found: {id}")));
        }
        Ok(())
    }

    async fn parse_voice(&self, transcript: &str) -> BackendResult<ParsedVoice> {
        if transcript.trim().is_empty() {
            return Err(BackendError::rejected(
                422,
                "transcript must not be empty".to_owned(),
            ));
        }
        let state = self.lock_read()?;
        Ok(state.parse_reply.clone().unwrap_or_default())
    }
}

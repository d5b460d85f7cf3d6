//! Fetch orchestration keeping the task collection consistent with the
//! remote backend.

use crate::view::domain::{
    NewTask, PageInfo, Task, TaskCollection, TaskId, TaskPatch, TaskPriority, TaskQuery,
    TaskStatus, ViewMode,
};
use crate::view::ports::{BackendError, TaskBackend};
use crate::view::services::DebounceGate;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use thiserror::Error;

/// Result type for controller operations.
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Tunable controller parameters.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Fixed page size sent with every fetch.
    pub page_limit: u32,
    /// Debounce quiet period for filter edits.
    pub quiet_period: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            page_limit: 5,
            quiet_period: DebounceGate::DEFAULT_QUIET_PERIOD,
        }
    }
}

/// Errors surfaced by controller operations.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// The backend call failed; the previous collection is untouched and a
    /// retry state has been recorded for fetches.
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The view state lock was poisoned by a panicking reader.
    #[error("view state lock poisoned")]
    Poisoned,
}

/// Result of one reconciliation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was applied to the task collection.
    Applied {
        /// Whether the presentation layer should surface a success notice.
        announced: bool,
    },
    /// A newer fetch was issued before this one resolved; the response was
    /// discarded silently.
    Stale,
}

/// Result of a mutation followed by its view refresh.
#[derive(Debug)]
pub struct MutationOutcome {
    /// The task the backend returned, when the operation yields one.
    pub task: Option<Task>,
    /// Outcome of the follow-up fetch of the current query and page. An
    /// `Err` here means the mutation itself succeeded but the view could
    /// not be refreshed; a retry state has been recorded.
    pub refresh: ControllerResult<FetchOutcome>,
}

/// Read-only view of the controller state, cloned per call.
///
/// Rendering components receive these snapshots; they never hold references
/// into the live collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewSnapshot {
    /// Active view mode.
    pub mode: ViewMode,
    /// Current filter intent, including edits still inside the debounce
    /// window.
    pub query: TaskQuery,
    /// Page the collection was fetched for.
    pub page: u32,
    /// The authoritative local page of tasks.
    pub collection: TaskCollection,
    /// Pagination metadata from the last applied fetch.
    pub pagination: Option<PageInfo>,
    /// Message of the last failed fetch, cleared by the next applied one.
    pub error: Option<String>,
}

/// Fetch that failed and can be replayed.
#[derive(Debug, Clone)]
struct FailedFetch {
    query: TaskQuery,
    page: u32,
    message: String,
}

#[derive(Debug)]
struct ViewState {
    query: TaskQuery,
    mode: ViewMode,
    page: u32,
    collection: TaskCollection,
    pagination: Option<PageInfo>,
    failed: Option<FailedFetch>,
}

/// Orchestrates fetches and mutations for the synchronized task view.
///
/// The controller is the sole writer of the task collection. Every fetch is
/// stamped with a monotonically increasing sequence token; a response is
/// applied only while its token is still the highest issued, so the
/// collection always reflects the most recently *initiated* successful
/// fetch regardless of response arrival order. In-flight calls are never
/// cancelled, only conditionally discarded.
pub struct ViewController<B> {
    backend: Arc<B>,
    gate: DebounceGate,
    page_limit: u32,
    issued: AtomicU64,
    state: Mutex<ViewState>,
}

impl<B: TaskBackend> ViewController<B> {
    /// Creates a controller over the given backend.
    #[must_use]
    pub fn new(backend: Arc<B>, config: &ControllerConfig) -> Self {
        Self {
            backend,
            gate: DebounceGate::new(config.quiet_period),
            page_limit: config.page_limit,
            issued: AtomicU64::new(0),
            state: Mutex::new(ViewState {
                query: TaskQuery::new(),
                mode: ViewMode::default(),
                page: 1,
                collection: TaskCollection::empty(ViewMode::default()),
                pagination: None,
                failed: None,
            }),
        }
    }

    /// Creates a controller with default configuration.
    #[must_use]
    pub fn with_defaults(backend: Arc<B>) -> Self {
        Self::new(backend, &ControllerConfig::default())
    }

    /// Returns a cloned, read-only snapshot of the current view state.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Poisoned`] when the state lock is
    /// poisoned.
    pub fn snapshot(&self) -> ControllerResult<ViewSnapshot> {
        let state = self.lock()?;
        Ok(ViewSnapshot {
            mode: state.mode,
            query: state.query.clone(),
            page: state.page,
            collection: state.collection.clone(),
            pagination: state.pagination,
            error: state.failed.as_ref().map(|failed| failed.message.clone()),
        })
    }

    /// Performs the single announced fetch of the mount path. The first
    /// render is not a filter change, so this never routes through the
    /// debounce gate.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Backend`] when the fetch fails; the
    /// (empty) collection is left untouched and [`Self::retry`] replays it.
    pub async fn load_initial(&self) -> ControllerResult<FetchOutcome> {
        let (query, mode) = {
            let state = self.lock()?;
            (state.query.clone(), state.mode)
        };
        self.refresh_with(query, 1, mode, true).await
    }

    /// Applies a filter edit to the query model immediately (so the edit
    /// echoes in snapshots), then waits out the debounce gate before
    /// fetching page 1 with the final filter state.
    ///
    /// Returns `Ok(None)` when a later edit superseded this one inside the
    /// quiet period; exactly one edit per burst fetches.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Backend`] when the surviving fetch fails.
    pub async fn edit_filters<F>(&self, edit: F) -> ControllerResult<Option<FetchOutcome>>
    where
        F: FnOnce(&mut TaskQuery),
    {
        let ticket = {
            let mut state = self.lock()?;
            edit(&mut state.query);
            self.gate.arm()
        };
        if !self.gate.settled(ticket).await {
            return Ok(None);
        }
        let (query, mode) = {
            let state = self.lock()?;
            (state.query.clone(), state.mode)
        };
        self.refresh_with(query, 1, mode, false).await.map(Some)
    }

    /// Switches between board and list presentation and refetches page 1
    /// immediately, bypassing the debounce gate. Returns `Ok(None)` when
    /// the mode is already active.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Backend`] when the fetch fails.
    pub async fn set_view_mode(&self, mode: ViewMode) -> ControllerResult<Option<FetchOutcome>> {
        let query = {
            let mut state = self.lock()?;
            if state.mode == mode {
                return Ok(None);
            }
            state.mode = mode;
            state.query.clone()
        };
        self.refresh_with(query, 1, mode, false).await.map(Some)
    }

    /// Requests an explicit page of the current filter state, bypassing the
    /// debounce gate and announcing on success.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Backend`] when the fetch fails.
    pub async fn set_page(&self, page: u32) -> ControllerResult<FetchOutcome> {
        let (query, mode) = {
            let state = self.lock()?;
            (state.query.clone(), state.mode)
        };
        self.refresh_with(query, page, mode, true).await
    }

    /// Refetches the current query and page without announcing.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Backend`] when the fetch fails.
    pub async fn refresh(&self) -> ControllerResult<FetchOutcome> {
        let (query, page, mode) = {
            let state = self.lock()?;
            (state.query.clone(), state.page, state.mode)
        };
        self.refresh_with(query, page, mode, false).await
    }

    /// Replays the last failed fetch with the exact query and page that
    /// failed, or the current ones when nothing failed.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Backend`] when the replay fails again.
    pub async fn retry(&self) -> ControllerResult<FetchOutcome> {
        let (query, page, mode) = {
            let state = self.lock()?;
            state.failed.as_ref().map_or(
                (state.query.clone(), state.page, state.mode),
                |failed| (failed.query.clone(), failed.page, state.mode),
            )
        };
        self.refresh_with(query, page, mode, false).await
    }

    /// Creates a task, then refreshes the current query and page so the
    /// view reflects authoritative post-mutation state.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Backend`] when the create call fails; the
    /// collection is left untouched and the refresh is skipped.
    pub async fn create_task(&self, payload: &NewTask) -> ControllerResult<MutationOutcome> {
        let task = self.backend.create_task(payload).await?;
        tracing::debug!(id = %task.id(), "task created");
        let refresh = self.refresh().await;
        Ok(MutationOutcome {
            task: Some(task),
            refresh,
        })
    }

    /// Moves a task to a new workflow status, then refreshes.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Backend`] when the mutation fails.
    pub async fn update_status(
        &self,
        id: &TaskId,
        status: TaskStatus,
    ) -> ControllerResult<MutationOutcome> {
        self.update_fields(id, &TaskPatch::new().with_status(status))
            .await
    }

    /// Changes a task's priority, then refreshes.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Backend`] when the mutation fails.
    pub async fn update_priority(
        &self,
        id: &TaskId,
        priority: TaskPriority,
    ) -> ControllerResult<MutationOutcome> {
        self.update_fields(id, &TaskPatch::new().with_priority(priority))
            .await
    }

    /// Applies a partial update to a task, then refreshes. The collection
    /// is never patched optimistically; the refresh re-reads server-side
    /// ordering and pagination.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Backend`] when the mutation fails; the
    /// refresh is skipped.
    pub async fn update_fields(
        &self,
        id: &TaskId,
        patch: &TaskPatch,
    ) -> ControllerResult<MutationOutcome> {
        let task = self.backend.update_task(id, patch).await?;
        tracing::debug!(%id, "task updated");
        let refresh = self.refresh().await;
        Ok(MutationOutcome {
            task: Some(task),
            refresh,
        })
    }

    /// Deletes a task, then refreshes.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Backend`] when the mutation fails; the
    /// refresh is skipped.
    pub async fn delete_task(&self, id: &TaskId) -> ControllerResult<MutationOutcome> {
        self.backend.delete_task(id).await?;
        tracing::debug!(%id, "task deleted");
        let refresh = self.refresh().await;
        Ok(MutationOutcome {
            task: None,
            refresh,
        })
    }

    /// Cancels any pending debounce window. In-flight fetches are not
    /// cancelled; their responses are discarded by the sequence-token rule
    /// if anything newer was issued.
    pub fn teardown(&self) {
        self.gate.cancel_pending();
    }

    /// Issues one stamped fetch and reconciles its response.
    ///
    /// Success replaces collection and pagination atomically (both under
    /// the one lock acquisition) and adopts the page the backend actually
    /// returned. Failure records a replayable retry state. Either way, a
    /// response whose token is no longer the highest issued is discarded.
    async fn refresh_with(
        &self,
        query: TaskQuery,
        page: u32,
        mode: ViewMode,
        announce: bool,
    ) -> ControllerResult<FetchOutcome> {
        let token = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(token, page, mode = %mode, "issuing fetch");

        let fetched = match mode {
            ViewMode::Board => self
                .backend
                .board_view(&query, page, self.page_limit)
                .await
                .map(|board| (TaskCollection::Board(board.data), board.pagination)),
            ViewMode::List => self
                .backend
                .list_view(&query, page, self.page_limit)
                .await
                .map(|list| (TaskCollection::List(list.data), list.pagination)),
        };

        let mut state = self.lock()?;
        if token != self.issued.load(Ordering::SeqCst) {
            tracing::debug!(token, "discarding stale response");
            return Ok(FetchOutcome::Stale);
        }

        match fetched {
            Ok((collection, pagination)) => {
                state.collection = collection;
                state.pagination = Some(pagination);
                state.page = pagination.current_page;
                state.failed = None;
                Ok(FetchOutcome::Applied {
                    announced: announce,
                })
            }
            Err(err) => {
                tracing::warn!(token, error = %err, "fetch failed, keeping previous collection");
                state.failed = Some(FailedFetch {
                    query,
                    page,
                    message: err.to_string(),
                });
                Err(ControllerError::Backend(err))
            }
        }
    }

    fn lock(&self) -> ControllerResult<MutexGuard<'_, ViewState>> {
        self.state.lock().map_err(|_| ControllerError::Poisoned)
    }
}

//! Drag-and-drop transitions between board columns.

use crate::view::domain::{Task, TaskStatus};
use crate::view::ports::TaskBackend;
use crate::view::services::{ControllerResult, FetchOutcome, ViewController};

/// Terminal result of a drop or drag-end.
#[derive(Debug)]
pub enum DropOutcome {
    /// The task changed columns: the status mutation succeeded.
    Moved {
        /// The task as it was when the drag started.
        task: Task,
        /// Outcome of the follow-up fetch; `Err` means the view could not
        /// be refreshed after the move and recorded a retry state.
        refresh: ControllerResult<FetchOutcome>,
    },
    /// The task was dropped on its own current-status column; no mutation
    /// was issued.
    SamePlace {
        /// The task as it was when the drag started.
        task: Task,
    },
    /// No drag was in progress.
    NothingDragged,
}

/// Interprets drag gestures as status-change commands.
///
/// The handler carries the dragged task by value from drag start, so a drop
/// never depends on the task collection still containing the task — the
/// collection may have been replaced wholesale mid-drag by a concurrent
/// fetch. Hover events only touch transient highlight state and never
/// mutate the collection.
#[derive(Debug, Default)]
pub struct DragHandler {
    dragged: Option<Task>,
    highlight: Option<TaskStatus>,
}

impl DragHandler {
    /// Creates an idle handler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a drag, taking ownership of the task's state at gesture
    /// start. Any previous drag is abandoned.
    pub fn drag_start(&mut self, task: Task) {
        tracing::debug!(id = %task.id(), "drag started");
        self.dragged = Some(task);
        self.highlight = None;
    }

    /// Returns the task being dragged, if any.
    #[must_use]
    pub const fn dragged(&self) -> Option<&Task> {
        self.dragged.as_ref()
    }

    /// Highlights a column as the current drop target.
    pub const fn drag_enter(&mut self, column: TaskStatus) {
        self.highlight = Some(column);
    }

    /// Clears the highlight when the pointer leaves a column. Ignored when
    /// the highlight already moved to another column, so an enter/leave
    /// pair reported out of order (the pointer crossing into a child of the
    /// drop target) does not flicker the highlight off.
    pub fn drag_leave(&mut self, column: TaskStatus) {
        if self.highlight == Some(column) {
            self.highlight = None;
        }
    }

    /// Returns the currently highlighted drop target, if any.
    #[must_use]
    pub const fn highlighted(&self) -> Option<TaskStatus> {
        self.highlight
    }

    /// Ends the drag without a drop. Terminal: the carried task and any
    /// highlight are discarded.
    pub fn drag_end(&mut self) {
        if self.dragged.is_some() {
            tracing::debug!("drag cancelled");
        }
        self.dragged = None;
        self.highlight = None;
    }

    /// Drops the carried task onto a column. Dropping on the task's own
    /// current-status column is a no-op that issues no mutation; otherwise
    /// the status change is delegated to the controller's mutation path,
    /// which refreshes the collection afterwards. Terminal either way.
    ///
    /// # Errors
    ///
    /// Returns [`crate::view::services::ControllerError::Backend`] when the
    /// status mutation fails; the drag still ends.
    pub async fn drop_on<B: TaskBackend>(
        &mut self,
        column: TaskStatus,
        controller: &ViewController<B>,
    ) -> ControllerResult<DropOutcome> {
        self.highlight = None;
        let Some(task) = self.dragged.take() else {
            return Ok(DropOutcome::NothingDragged);
        };
        if task.status() == column {
            tracing::debug!(id = %task.id(), "dropped on own column, ignoring");
            return Ok(DropOutcome::SamePlace { task });
        }
        let outcome = controller.update_status(task.id(), column).await?;
        Ok(DropOutcome::Moved {
            task,
            refresh: outcome.refresh,
        })
    }
}

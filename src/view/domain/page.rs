//! View mode, pagination metadata, and the page-scoped task collection.

use super::{Task, TaskId, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Presentation shape of the task view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Three fixed columns grouped by workflow status.
    #[default]
    Board,
    /// A flat page of tasks.
    List,
}

impl ViewMode {
    /// Returns the canonical endpoint discriminator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Board => "board",
            Self::List => "list",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pagination metadata produced by the backend per response.
///
/// Consumed verbatim; these values are authoritative over anything the view
/// could compute locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Page the response actually covers (1-based).
    pub current_page: u32,
    /// Total pages under the current filter.
    pub total_pages: u32,
    /// Whether a later page exists.
    pub has_next: bool,
    /// Whether an earlier page exists.
    pub has_prev: bool,
}

/// One page of tasks grouped into the three fixed board columns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardColumns {
    /// Tasks not yet started.
    #[serde(rename = "To Do", default)]
    to_do: Vec<Task>,
    /// Tasks underway.
    #[serde(rename = "In Progress", default)]
    in_progress: Vec<Task>,
    /// Finished tasks.
    #[serde(rename = "Done", default)]
    done: Vec<Task>,
}

impl BoardColumns {
    /// Groups a flat page of tasks into columns, preserving relative order.
    #[must_use]
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut columns = Self::default();
        for task in tasks {
            match task.status() {
                TaskStatus::ToDo => columns.to_do.push(task),
                TaskStatus::InProgress => columns.in_progress.push(task),
                TaskStatus::Done => columns.done.push(task),
            }
        }
        columns
    }

    /// Returns the tasks in the given column.
    #[must_use]
    pub fn column(&self, status: TaskStatus) -> &[Task] {
        match status {
            TaskStatus::ToDo => &self.to_do,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    /// Total number of tasks across all columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.to_do.len() + self.in_progress.len() + self.done.len()
    }

    /// Returns `true` when every column is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_do.is_empty() && self.in_progress.is_empty() && self.done.is_empty()
    }

    /// Iterates over all tasks, column by column.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.to_do
            .iter()
            .chain(self.in_progress.iter())
            .chain(self.done.iter())
    }
}

/// The authoritative, locally held page of tasks for the current view.
///
/// Replaced wholesale on every successful fetch, never patched
/// incrementally, so local and remote state cannot drift apart piecemeal.
/// Written exclusively by the view controller's reconciliation step; every
/// other component only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCollection {
    /// Column-grouped page for the board view.
    Board(BoardColumns),
    /// Flat page for the list view.
    List(Vec<Task>),
}

impl TaskCollection {
    /// Creates an empty collection for the given view mode.
    #[must_use]
    pub const fn empty(mode: ViewMode) -> Self {
        match mode {
            ViewMode::Board => Self::Board(BoardColumns {
                to_do: Vec::new(),
                in_progress: Vec::new(),
                done: Vec::new(),
            }),
            ViewMode::List => Self::List(Vec::new()),
        }
    }

    /// Returns the view mode this collection was fetched for.
    #[must_use]
    pub const fn mode(&self) -> ViewMode {
        match self {
            Self::Board(_) => ViewMode::Board,
            Self::List(_) => ViewMode::List,
        }
    }

    /// Number of tasks on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Board(columns) => columns.len(),
            Self::List(tasks) => tasks.len(),
        }
    }

    /// Returns `true` when the page holds no tasks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Board(columns) => columns.is_empty(),
            Self::List(tasks) => tasks.is_empty(),
        }
    }

    /// Looks up a task on this page by identifier.
    #[must_use]
    pub fn find(&self, id: &TaskId) -> Option<&Task> {
        self.iter().find(|task| task.id() == id)
    }

    /// Iterates over all tasks on this page.
    pub fn iter(&self) -> Box<dyn Iterator<Item = &Task> + '_> {
        match self {
            Self::Board(columns) => Box::new(columns.iter()),
            Self::List(tasks) => Box::new(tasks.iter()),
        }
    }
}

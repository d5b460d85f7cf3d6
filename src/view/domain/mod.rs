//! Domain model for the synchronized task view.
//!
//! The view domain models tasks, the user's filter and pagination intent,
//! and the page-scoped task collection while keeping all transport concerns
//! outside of the domain boundary.

mod error;
mod page;
mod query;
mod task;

pub use error::{ParseDueDateError, ParsePriorityError, ParseStatusError, TaskDomainError};
pub use page::{BoardColumns, PageInfo, TaskCollection, ViewMode};
pub use query::TaskQuery;
pub use task::{DueDate, NewTask, Task, TaskId, TaskPatch, TaskPriority, TaskStatus};

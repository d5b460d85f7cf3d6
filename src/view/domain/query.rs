//! Canonical representation of the user's filter intent.

use super::{DueDate, TaskPriority, TaskStatus};
use serde::{Deserialize, Serialize};

/// Serializable filter intent driving a fetch.
///
/// An unset field means "no constraint"; it is omitted from the request
/// entirely rather than sent as a wildcard string. Empty search text
/// normalizes to unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<DueDate>,
}

impl TaskQuery {
    /// Creates an unconstrained query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrains or clears the status filter.
    pub const fn set_status(&mut self, status: Option<TaskStatus>) {
        self.status = status;
    }

    /// Constrains or clears the priority filter.
    pub const fn set_priority(&mut self, priority: Option<TaskPriority>) {
        self.priority = priority;
    }

    /// Sets the free-text search filter; empty or whitespace-only text
    /// clears it.
    pub fn set_search(&mut self, search: impl Into<String>) {
        let text = search.into();
        if text.trim().is_empty() {
            self.search = None;
        } else {
            self.search = Some(text);
        }
    }

    /// Constrains or clears the due-date filter.
    pub const fn set_due_date(&mut self, due_date: Option<DueDate>) {
        self.due_date = due_date;
    }

    /// Clears every filter.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns the status constraint.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }

    /// Returns the priority constraint.
    #[must_use]
    pub const fn priority(&self) -> Option<TaskPriority> {
        self.priority
    }

    /// Returns the search text constraint.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Returns the due-date constraint.
    #[must_use]
    pub const fn due_date(&self) -> Option<DueDate> {
        self.due_date
    }

    /// Returns `true` when no filter is set.
    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        self.status.is_none()
            && self.priority.is_none()
            && self.search.is_none()
            && self.due_date.is_none()
    }

    /// Assembles the request query string pairs: `page` and `limit` always,
    /// filter fields only when constrained.
    #[must_use]
    pub fn to_params(&self, page: u32, limit: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", page.to_string()), ("limit", limit.to_string())];
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_owned()));
        }
        if let Some(priority) = self.priority {
            params.push(("priority", priority.as_str().to_owned()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        if let Some(due_date) = self.due_date {
            params.push(("dueDate", due_date.to_wire()));
        }
        params
    }
}

//! Task entity and the validated payloads that create and mutate it.

use super::{ParseDueDateError, ParsePriorityError, ParseStatusError, TaskDomainError};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opaque, server-assigned task identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a validated task identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskId`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(TaskDomainError::EmptyTaskId);
        }
        Ok(Self(raw))
    }

    /// Creates an identifier from a freshly minted UUID. Only backend
    /// implementations assign ids; the view never invents them.
    #[must_use]
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid.to_string())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Workflow state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Work has not started.
    #[serde(rename = "To Do")]
    ToDo,
    /// Work is underway.
    #[serde(rename = "In Progress")]
    InProgress,
    /// Work is finished.
    #[serde(rename = "Done")]
    Done,
}

impl TaskStatus {
    /// The three fixed board columns, in rendering order.
    pub const COLUMNS: [Self; 3] = [Self::ToDo, Self::InProgress, Self::Done];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "to do" => Ok(Self::ToDo),
            "in progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Urgency level of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskPriority {
    /// Can wait.
    Low,
    /// Default urgency.
    Medium,
    /// Should be handled soon.
    High,
    /// Needs immediate attention.
    Critical,
}

impl TaskPriority {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar due date owning both boundary encodings.
///
/// The wire format is day-month-year (`DD-MM-YYYY`); the editing surface
/// uses year-month-day (`YYYY-MM-DD`). Each boundary crossing converts
/// exactly once through this type. An absent due date is represented by
/// `Option::None`, never by an empty or placeholder string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DueDate(NaiveDate);

impl DueDate {
    const WIRE_FORMAT: &'static str = "%d-%m-%Y";
    const EDIT_FORMAT: &'static str = "%Y-%m-%d";

    /// Wraps a calendar date.
    #[must_use]
    pub const fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Parses the wire encoding (`DD-MM-YYYY`).
    ///
    /// # Errors
    ///
    /// Returns [`ParseDueDateError`] when the value is not a valid
    /// day-month-year date.
    pub fn parse_wire(value: &str) -> Result<Self, ParseDueDateError> {
        NaiveDate::parse_from_str(value.trim(), Self::WIRE_FORMAT)
            .map(Self)
            .map_err(|_| ParseDueDateError {
                value: value.to_owned(),
                expected: "DD-MM-YYYY",
            })
    }

    /// Parses the editing-surface encoding (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Returns [`ParseDueDateError`] when the value is not a valid
    /// year-month-day date.
    pub fn parse_edit(value: &str) -> Result<Self, ParseDueDateError> {
        NaiveDate::parse_from_str(value.trim(), Self::EDIT_FORMAT)
            .map(Self)
            .map_err(|_| ParseDueDateError {
                value: value.to_owned(),
                expected: "YYYY-MM-DD",
            })
    }

    /// Renders the wire encoding (`DD-MM-YYYY`).
    #[must_use]
    pub fn to_wire(self) -> String {
        self.0.format(Self::WIRE_FORMAT).to_string()
    }

    /// Renders the editing-surface encoding (`YYYY-MM-DD`).
    #[must_use]
    pub fn to_edit(self) -> String {
        self.0.format(Self::EDIT_FORMAT).to_string()
    }

    /// Returns the wrapped calendar date.
    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wire())
    }
}

impl Serialize for DueDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

impl<'de> Deserialize<'de> for DueDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse_wire(&raw).map_err(serde::de::Error::custom)
    }
}

/// Task entity as held by the view, mirroring the backend record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id")]
    id: TaskId,
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<DueDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    transcript: Option<String>,
}

impl Task {
    /// Assembles a task from a server-assigned identifier and a validated
    /// create payload. Used by backend implementations when minting records.
    #[must_use]
    pub fn from_create(id: TaskId, payload: NewTask) -> Self {
        Self {
            id,
            title: payload.title,
            description: payload.description,
            status: payload.status,
            priority: payload.priority,
            due_date: payload.due_date,
            transcript: payload.transcript,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date, if one is set.
    #[must_use]
    pub const fn due_date(&self) -> Option<DueDate> {
        self.due_date
    }

    /// Returns the originating voice transcript, if the task was dictated.
    #[must_use]
    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    /// Applies a partial update in place, mirroring the backend's update
    /// semantics. Used by fake backend implementations.
    pub fn apply_patch(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title.clone_from(title);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = Some(due_date);
        }
    }
}

/// Validated payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<DueDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transcript: Option<String>,
}

impl NewTask {
    /// Minimum trimmed title length for user-authored tasks.
    pub const MIN_TITLE_CHARS: usize = 10;
    /// Minimum trimmed description length.
    pub const MIN_DESCRIPTION_CHARS: usize = 10;
    /// Maximum storable transcript length.
    pub const MAX_TRANSCRIPT_CHARS: usize = 1000;

    /// Creates a validated payload with default status (`To Do`) and
    /// priority (`Medium`).
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TitleTooShort`] or
    /// [`TaskDomainError::DescriptionTooShort`] when either field is under
    /// ten trimmed characters.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, TaskDomainError> {
        let title_text = title.into();
        let description_text = description.into();

        let title_len = title_text.trim().chars().count();
        if title_len < Self::MIN_TITLE_CHARS {
            return Err(TaskDomainError::TitleTooShort {
                minimum: Self::MIN_TITLE_CHARS,
                actual: title_len,
            });
        }
        let description_len = description_text.trim().chars().count();
        if description_len < Self::MIN_DESCRIPTION_CHARS {
            return Err(TaskDomainError::DescriptionTooShort {
                minimum: Self::MIN_DESCRIPTION_CHARS,
                actual: description_len,
            });
        }

        Ok(Self {
            title: title_text,
            description: description_text,
            status: TaskStatus::ToDo,
            priority: TaskPriority::Medium,
            due_date: None,
            transcript: None,
        })
    }

    /// Sets the initial workflow status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<DueDate>) -> Self {
        self.due_date = due_date;
        self
    }

    /// Attaches the originating voice transcript.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TranscriptTooLong`] when the transcript
    /// exceeds 1000 characters.
    pub fn with_transcript(
        mut self,
        transcript: impl Into<String>,
    ) -> Result<Self, TaskDomainError> {
        let text = transcript.into();
        let len = text.chars().count();
        if len > Self::MAX_TRANSCRIPT_CHARS {
            return Err(TaskDomainError::TranscriptTooLong {
                maximum: Self::MAX_TRANSCRIPT_CHARS,
                actual: len,
            });
        }
        self.transcript = Some(text);
        Ok(self)
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the initial workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the due date, if one is set.
    #[must_use]
    pub const fn due_date(&self) -> Option<DueDate> {
        self.due_date
    }

    /// Returns the attached transcript, if any.
    #[must_use]
    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }
}

/// Partial update payload identified by task id at the transport layer.
///
/// Only fields that are set are serialized, so an empty patch carries no
/// field at all. Patches cannot clear a due date; the backend contract has
/// no encoding for that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_date: Option<DueDate>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a new title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets a new description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a new workflow status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets a new priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets a new due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DueDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }

    /// Returns the status change carried by this patch, if any.
    #[must_use]
    pub const fn status(&self) -> Option<TaskStatus> {
        self.status
    }
}

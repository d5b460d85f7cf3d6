//! Editable task draft produced from a voice transcript.

use crate::view::domain::{DueDate, NewTask, TaskDomainError, TaskPriority, TaskStatus};
use crate::view::ports::ParsedVoice;
use chrono::NaiveDate;

/// Number of transcript characters used for the fallback title when the
/// parsing collaborator omits one.
const FALLBACK_TITLE_CHARS: usize = 100;

/// Transient, editable task built from a transcript and the collaborator's
/// best-effort decomposition.
///
/// Exists only for the duration of one capture session. The raw transcript
/// is retained read-only; every other field is freely editable before
/// submission. The due date is held in the editing representation
/// ([`NaiveDate`], year-month-day) — the wire value crossed that boundary
/// exactly once when the draft was built, and crosses back exactly once
/// when the create payload is serialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    title: String,
    description: String,
    status: TaskStatus,
    priority: TaskPriority,
    due_date: Option<NaiveDate>,
    transcript: String,
}

impl TaskDraft {
    /// Builds a draft from the transcript and the collaborator's guess,
    /// filling omissions with transcript-derived fallbacks: the first 100
    /// characters as title, the full transcript as description, `To Do`
    /// status, `Medium` priority. An omitted, literal-`"null"`, or
    /// unparsable due date stays absent rather than becoming a formatted
    /// placeholder; unrecognized priority strings fall back the same way.
    #[must_use]
    pub fn from_parsed(transcript: &str, parsed: ParsedVoice) -> Self {
        let title = parsed
            .title
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| transcript.chars().take(FALLBACK_TITLE_CHARS).collect());
        let description = parsed
            .description
            .filter(|description| !description.trim().is_empty())
            .unwrap_or_else(|| transcript.to_owned());
        let priority = parsed
            .priority
            .and_then(|raw| TaskPriority::try_from(raw.as_str()).ok())
            .unwrap_or(TaskPriority::Medium);
        let due_date = parsed
            .due_date
            .filter(|raw| raw != "null")
            .and_then(|raw| DueDate::parse_wire(&raw).ok())
            .map(DueDate::date);

        Self {
            title,
            description,
            status: TaskStatus::ToDo,
            priority,
            due_date,
            transcript: transcript.to_owned(),
        }
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replaces the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Returns the workflow status the task will be created with.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Replaces the status.
    pub const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Replaces the priority.
    pub const fn set_priority(&mut self, priority: TaskPriority) {
        self.priority = priority;
    }

    /// Returns the due date in the editing representation.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Replaces or clears the due date.
    pub const fn set_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.due_date = due_date;
    }

    /// Returns the raw transcript. The draft carries it unchanged; there is
    /// no setter.
    #[must_use]
    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// Validates the draft and assembles the create payload, converting the
    /// due date back to the wire encoding.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the trimmed title or description is
    /// under ten characters or the transcript exceeds 1000 characters.
    /// These are local validation failures; nothing reaches the network.
    pub fn to_create_payload(&self) -> Result<NewTask, TaskDomainError> {
        NewTask::new(self.title.clone(), self.description.clone())?
            .with_status(self.status)
            .with_priority(self.priority)
            .with_due_date(self.due_date.map(DueDate::from_date))
            .with_transcript(self.transcript.clone())
    }
}

//! Task record and its self-contained behaviour.

use super::{TaskId, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Maximum title length, in characters, accepted by persistent stores.
pub const TITLE_MAX_CHARS: usize = 200;

/// Maximum description length, in characters, accepted by persistent stores.
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// A discrete unit of work.
///
/// Title validation is not performed here; the task service rejects blank
/// titles and repositories enforce length limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskItem {
    id: TaskId,
    title: String,
    description: Option<String>,
    priority: TaskPriority,
    status: TaskStatus,
    created_at: DateTime<Utc>,
    due_date: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted completion timestamp, if any.
    pub completed_at: Option<DateTime<Utc>>,
}

impl TaskItem {
    /// Creates an unpersisted task with default priority and status.
    #[must_use]
    pub fn new(title: impl Into<String>, clock: &impl Clock) -> Self {
        Self {
            id: TaskId::UNASSIGNED,
            title: title.into(),
            description: None,
            priority: TaskPriority::default(),
            status: TaskStatus::default(),
            created_at: clock.utc(),
            due_date: None,
            completed_at: None,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            created_at: data.created_at,
            due_date: data.due_date,
            completed_at: data.completed_at,
        }
    }

    /// Sets the identifier. Repositories call this when assigning identity;
    /// callers use it to address an existing record for update.
    #[must_use]
    pub const fn with_id(mut self, id: TaskId) -> Self {
        self.id = id;
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Sets the creation timestamp.
    ///
    /// The task service overwrites this value when the task is created, and
    /// repositories ignore it on update.
    #[must_use]
    pub const fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the completion timestamp, if the task was ever marked complete.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Replaces the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replaces or clears the description.
    pub fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    /// Replaces the priority.
    pub const fn set_priority(&mut self, priority: TaskPriority) {
        self.priority = priority;
    }

    /// Replaces the status.
    ///
    /// `completed_at` is left untouched, including when moving away from
    /// [`TaskStatus::Completed`].
    pub const fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Replaces or clears the due date.
    pub const fn set_due_date(&mut self, due_date: Option<DateTime<Utc>>) {
        self.due_date = due_date;
    }

    pub(crate) const fn stamp_created_at(&mut self, created_at: DateTime<Utc>) {
        self.created_at = created_at;
    }

    /// Marks the task completed at the current clock time.
    ///
    /// Calling this again refreshes `completed_at`.
    pub fn mark_complete(&mut self, clock: &impl Clock) {
        self.status = TaskStatus::Completed;
        self.completed_at = Some(clock.utc());
    }

    /// Returns `true` when the due date has passed and the task is not
    /// completed, evaluated against the current clock time.
    ///
    /// Cancelled tasks still count as overdue.
    #[must_use]
    pub fn is_overdue(&self, clock: &impl Clock) -> bool {
        self.is_overdue_at(clock.utc())
    }

    /// Overdue predicate evaluated at `now`.
    #[must_use]
    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        self.status != TaskStatus::Completed && self.due_date.is_some_and(|due| due < now)
    }
}

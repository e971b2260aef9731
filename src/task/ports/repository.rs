//! Repository port for task persistence.

use crate::task::domain::{DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS, TaskId, TaskItem};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// "Not found" is never an error here: lookups and updates return `None` and
/// deletes return `false`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Returns every task, most recently created first.
    async fn list_all(&self) -> TaskRepositoryResult<Vec<TaskItem>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<TaskItem>>;

    /// Stores a new task and returns it with its assigned identifier.
    ///
    /// Any identifier already present on `task` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::FieldTooLong`] when the title or
    /// description exceeds the storage limits.
    async fn add(&self, task: TaskItem) -> TaskRepositoryResult<TaskItem>;

    /// Replaces every field of an existing task except `created_at`, which
    /// keeps its stored value.
    ///
    /// Returns `None` when no task has the given identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::FieldTooLong`] when the title or
    /// description exceeds the storage limits.
    async fn update(&self, task: TaskItem) -> TaskRepositoryResult<Option<TaskItem>>;

    /// Removes a task permanently.
    ///
    /// Returns `true` when a task was removed and `false` when nothing matched.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A text field exceeds its storage limit.
    #[error("{field} must be at most {max} characters, got {actual}")]
    FieldTooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Maximum accepted length in characters.
        max: usize,
        /// Length of the rejected value in characters.
        actual: usize,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Checks the title and description against the storage limits.
///
/// Adapters call this before writing so every store reports oversized fields
/// the same way.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::FieldTooLong`] for the first field that
/// exceeds its limit.
pub fn check_field_lengths(task: &TaskItem) -> TaskRepositoryResult<()> {
    check_length("title", task.title(), TITLE_MAX_CHARS)?;
    if let Some(description) = task.description() {
        check_length("description", description, DESCRIPTION_MAX_CHARS)?;
    }
    Ok(())
}

fn check_length(field: &'static str, value: &str, max: usize) -> TaskRepositoryResult<()> {
    let actual = value.chars().count();
    if actual > max {
        return Err(TaskRepositoryError::FieldTooLong { field, max, actual });
    }
    Ok(())
}

//! Service layer enforcing task business rules over a repository.

use crate::task::{
    domain::{TaskId, TaskItem, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for task operations.
///
/// Argument errors are raised before any repository call is attempted.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// A required record was absent.
    #[error("{0} must be provided")]
    NullArgument(&'static str),

    /// A value was present but violated a constraint.
    #[error("invalid {param}: {reason}")]
    InvalidArgument {
        /// Name of the offending argument.
        param: &'static str,
        /// Constraint that was violated.
        reason: &'static str,
    },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
///
/// Holds no mutable state of its own; consistency between concurrent callers
/// is left to the repository.
#[derive(Clone)]
pub struct TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns every task, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    #[tracing::instrument(skip_all)]
    pub async fn list_tasks(&self) -> TaskServiceResult<Vec<TaskItem>> {
        let tasks = self.repository.list_all().await?;
        tracing::debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::InvalidArgument`] when `id` is not
    /// positive, or [`TaskServiceError::Repository`] when the lookup fails.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn get_task(&self, id: TaskId) -> TaskServiceResult<Option<TaskItem>> {
        require_positive_id(id)?;
        let task = self.repository.find_by_id(id).await?;
        tracing::debug!(found = task.is_some(), "looked up task");
        Ok(task)
    }

    /// Creates a task.
    ///
    /// `created_at` is always overwritten with the current time and any
    /// identifier on the input is discarded by the repository.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NullArgument`] when `task` is `None`,
    /// [`TaskServiceError::InvalidArgument`] when the title is blank, or
    /// [`TaskServiceError::Repository`] when persistence fails.
    #[tracing::instrument(skip_all)]
    pub async fn create_task(&self, task: Option<TaskItem>) -> TaskServiceResult<TaskItem> {
        let mut record = require_present(task)?;
        if record.title().trim().is_empty() {
            tracing::warn!("rejected task with blank title");
            return Err(TaskServiceError::InvalidArgument {
                param: "title",
                reason: "task title cannot be empty",
            });
        }

        record.stamp_created_at(self.clock.utc());
        let created = self.repository.add(record).await?;
        tracing::info!(id = %created.id(), "created task");
        Ok(created)
    }

    /// Replaces an existing task.
    ///
    /// Returns `Ok(None)` when no task has the record's identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NullArgument`] when `task` is `None`,
    /// [`TaskServiceError::InvalidArgument`] when its identifier is not
    /// positive, or [`TaskServiceError::Repository`] when persistence fails.
    #[tracing::instrument(skip_all)]
    pub async fn update_task(&self, task: Option<TaskItem>) -> TaskServiceResult<Option<TaskItem>> {
        let record = require_present(task)?;
        let id = record.id();
        require_positive_id(id)?;

        let updated = self.repository.update(record).await?;
        if updated.is_some() {
            tracing::info!(id = %id, "updated task");
        } else {
            tracing::debug!(id = %id, "no task to update");
        }
        Ok(updated)
    }

    /// Deletes a task permanently.
    ///
    /// Returns `Ok(false)` when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::InvalidArgument`] when `id` is not
    /// positive, or [`TaskServiceError::Repository`] when persistence fails.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn delete_task(&self, id: TaskId) -> TaskServiceResult<bool> {
        require_positive_id(id)?;
        let deleted = self.repository.delete(id).await?;
        if deleted {
            tracing::info!("deleted task");
        }
        Ok(deleted)
    }

    /// Marks a task complete and persists it.
    ///
    /// Returns `Ok(None)` when the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::InvalidArgument`] when `id` is not
    /// positive, or [`TaskServiceError::Repository`] when persistence fails.
    #[tracing::instrument(skip_all, fields(id = %id))]
    pub async fn complete_task(&self, id: TaskId) -> TaskServiceResult<Option<TaskItem>> {
        require_positive_id(id)?;
        let Some(mut task) = self.repository.find_by_id(id).await? else {
            tracing::debug!("no task to complete");
            return Ok(None);
        };

        task.mark_complete(&*self.clock);
        let completed = self.repository.update(task).await?;
        if completed.is_some() {
            tracing::info!("completed task");
        }
        Ok(completed)
    }

    /// Returns the tasks with the given status, in listing order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    #[tracing::instrument(skip_all, fields(status = %status))]
    pub async fn list_by_status(&self, status: TaskStatus) -> TaskServiceResult<Vec<TaskItem>> {
        let tasks = self.list_tasks().await?;
        Ok(tasks
            .into_iter()
            .filter(|task| task.status() == status)
            .collect())
    }

    /// Returns the tasks that are overdue right now, in listing order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Repository`] when the lookup fails.
    #[tracing::instrument(skip_all)]
    pub async fn list_overdue(&self) -> TaskServiceResult<Vec<TaskItem>> {
        let tasks = self.list_tasks().await?;
        let now = self.clock.utc();
        Ok(tasks
            .into_iter()
            .filter(|task| task.is_overdue_at(now))
            .collect())
    }
}

fn require_present(task: Option<TaskItem>) -> TaskServiceResult<TaskItem> {
    task.ok_or_else(|| {
        tracing::warn!("rejected absent task record");
        TaskServiceError::NullArgument("task")
    })
}

fn require_positive_id(id: TaskId) -> TaskServiceResult<()> {
    if id.is_assigned() {
        return Ok(());
    }
    tracing::warn!(id = %id, "rejected non-positive task id");
    Err(TaskServiceError::InvalidArgument {
        param: "id",
        reason: "task id must be positive",
    })
}

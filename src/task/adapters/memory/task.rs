//! In-memory repository for task tracking.

use async_trait::async_trait;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{TaskId, TaskItem},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult, check_field_lengths},
};

/// Thread-safe in-memory task repository.
///
/// Identifiers are assigned sequentially from 1 and never reused.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, TaskItem>,
    last_id: i64,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list_all(&self) -> TaskRepositoryResult<Vec<TaskItem>> {
        let state = self.read()?;
        let mut tasks: Vec<TaskItem> = state.tasks.values().cloned().collect();
        tasks.sort_by_key(|task| Reverse((task.created_at(), task.id())));
        Ok(tasks)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<TaskItem>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn add(&self, task: TaskItem) -> TaskRepositoryResult<TaskItem> {
        check_field_lengths(&task)?;
        let mut state = self.write()?;
        state.last_id += 1;
        let stored = task.with_id(TaskId::new(state.last_id));
        state.tasks.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn update(&self, task: TaskItem) -> TaskRepositoryResult<Option<TaskItem>> {
        check_field_lengths(&task)?;
        let mut state = self.write()?;
        let Some(existing) = state.tasks.get_mut(&task.id()) else {
            return Ok(None);
        };
        let replacement = task.with_created_at(existing.created_at());
        *existing = replacement.clone();
        Ok(Some(replacement))
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.write()?;
        Ok(state.tasks.remove(&id).is_some())
    }
}

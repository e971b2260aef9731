//! `SQLite` repository implementation for task storage.

use super::{
    models::{TaskItemChanges, TaskItemRow, TaskItemValues},
    schema::task_items,
};
use crate::task::{
    domain::{PersistedTaskData, TaskId, TaskItem, TaskPriority, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult, check_field_lengths},
};
use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;

/// `SQLite` connection pool type used by task adapters.
pub type TaskSqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// SQL creating the task table and its indexes. Safe to apply repeatedly.
pub const CREATE_TASK_ITEMS_SQL: &str =
    include_str!("../../../../migrations/2026-10-15-000000_create_task_items/up.sql");

/// Milliseconds a connection waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Applies per-connection pragmas when the pool opens a connection.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqliteConnectionOptions {
    fn on_acquire(&self, connection: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        connection
            .batch_execute(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS};"))
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// `SQLite`-backed task repository.
#[derive(Debug, Clone)]
pub struct SqliteTaskRepository {
    pool: TaskSqlitePool,
}

impl SqliteTaskRepository {
    /// Creates a new repository from a `SQLite` connection pool.
    #[must_use]
    pub const fn new(pool: TaskSqlitePool) -> Self {
        Self { pool }
    }

    /// Creates the task table if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the schema cannot be
    /// applied.
    pub async fn apply_schema(&self) -> TaskRepositoryResult<()> {
        self.run_blocking(|connection| {
            connection
                .batch_execute(CREATE_TASK_ITEMS_SQL)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut SqliteConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn list_all(&self) -> TaskRepositoryResult<Vec<TaskItem>> {
        self.run_blocking(|connection| {
            let rows = task_items::table
                .order((task_items::created_at.desc(), task_items::id.desc()))
                .select(TaskItemRow::as_select())
                .load::<TaskItemRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<TaskItem>> {
        self.run_blocking(move |connection| {
            let row = task_items::table
                .find(id.value())
                .select(TaskItemRow::as_select())
                .first::<TaskItemRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn add(&self, task: TaskItem) -> TaskRepositoryResult<TaskItem> {
        check_field_lengths(&task)?;
        let values = to_values(&task);

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(task_items::table)
                .values(&values)
                .returning(TaskItemRow::as_returning())
                .get_result::<TaskItemRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            row_to_task(row)
        })
        .await
    }

    async fn update(&self, task: TaskItem) -> TaskRepositoryResult<Option<TaskItem>> {
        check_field_lengths(&task)?;
        let id = task.id();
        let changes = to_changes(&task);

        self.run_blocking(move |connection| {
            let row = diesel::update(task_items::table.find(id.value()))
                .set(&changes)
                .returning(TaskItemRow::as_returning())
                .get_result::<TaskItemRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(task_items::table.find(id.value()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(removed > 0)
        })
        .await
    }
}

fn to_values(task: &TaskItem) -> TaskItemValues {
    TaskItemValues {
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        priority: task.priority().code(),
        status: task.status().code(),
        created_at: task.created_at().naive_utc(),
        due_date: task.due_date().map(|due| due.naive_utc()),
        completed_at: task.completed_at().map(|done| done.naive_utc()),
    }
}

fn to_changes(task: &TaskItem) -> TaskItemChanges {
    TaskItemChanges {
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        priority: task.priority().code(),
        status: task.status().code(),
        due_date: task.due_date().map(|due| due.naive_utc()),
        completed_at: task.completed_at().map(|done| done.naive_utc()),
    }
}

fn row_to_task(row: TaskItemRow) -> TaskRepositoryResult<TaskItem> {
    let TaskItemRow {
        id,
        title,
        description,
        priority: persisted_priority,
        status: persisted_status,
        created_at,
        due_date,
        completed_at,
    } = row;

    let priority =
        TaskPriority::try_from(persisted_priority).map_err(TaskRepositoryError::persistence)?;
    let status = TaskStatus::try_from(persisted_status).map_err(TaskRepositoryError::persistence)?;

    let data = PersistedTaskData {
        id: TaskId::new(id),
        title,
        description,
        priority,
        status,
        created_at: created_at.and_utc(),
        due_date: due_date.map(|due| due.and_utc()),
        completed_at: completed_at.map(|done| done.and_utc()),
    };
    Ok(TaskItem::from_persisted(data))
}

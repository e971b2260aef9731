//! `SQLite` adapters for task persistence.

mod models;
mod repository;
mod schema;

pub use repository::{
    CREATE_TASK_ITEMS_SQL, SqliteConnectionOptions, SqliteTaskRepository, TaskSqlitePool,
};

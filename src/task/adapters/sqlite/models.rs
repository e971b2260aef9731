//! Diesel row models for task persistence.

use super::schema::task_items;
use chrono::NaiveDateTime;
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskItemRow {
    /// Store-assigned identifier.
    pub id: i64,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Priority storage code.
    pub priority: i32,
    /// Status storage code.
    pub status: i32,
    /// Creation timestamp (UTC).
    pub created_at: NaiveDateTime,
    /// Optional due date (UTC).
    pub due_date: Option<NaiveDateTime>,
    /// Optional completion timestamp (UTC).
    pub completed_at: Option<NaiveDateTime>,
}

/// Column values written when a task is first stored.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_items)]
pub struct TaskItemValues {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Priority storage code.
    pub priority: i32,
    /// Status storage code.
    pub status: i32,
    /// Creation timestamp (UTC).
    pub created_at: NaiveDateTime,
    /// Optional due date (UTC).
    pub due_date: Option<NaiveDateTime>,
    /// Optional completion timestamp (UTC).
    pub completed_at: Option<NaiveDateTime>,
}

/// Column values written on update.
///
/// `created_at` is absent so the stored creation time survives. `None`
/// fields are written as `NULL` so an update clears them.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = task_items)]
#[diesel(treat_none_as_null = true)]
pub struct TaskItemChanges {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Priority storage code.
    pub priority: i32,
    /// Status storage code.
    pub status: i32,
    /// Optional due date (UTC).
    pub due_date: Option<NaiveDateTime>,
    /// Optional completion timestamp (UTC).
    pub completed_at: Option<NaiveDateTime>,
}

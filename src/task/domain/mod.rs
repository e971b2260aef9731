//! Domain model for task tracking.
//!
//! The task record carries its own completion and overdue behaviour while
//! validation, timestamping, and persistence stay outside the domain
//! boundary.

mod error;
mod ids;
mod status;
mod task;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError};
pub use ids::TaskId;
pub use status::{TaskPriority, TaskStatus};
pub use task::{DESCRIPTION_MAX_CHARS, PersistedTaskData, TITLE_MAX_CHARS, TaskItem};

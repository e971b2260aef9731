//! Identifier types for the task domain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned identifier for a task record.
///
/// Identity is owned by the persistence layer. A record that has not been
/// added yet carries [`TaskId::UNASSIGNED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Identifier carried by records that have not been persisted.
    pub const UNASSIGNED: Self = Self(0);

    /// Wraps a raw identifier value.
    ///
    /// No range check is applied here; callers such as the task service
    /// decide which values they accept.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Returns `true` when the identifier could have been assigned by a store.
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        self.0 > 0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::UNASSIGNED
    }
}

impl From<i64> for TaskId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

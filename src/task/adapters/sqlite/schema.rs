//! Diesel schema for task persistence.

diesel::table! {
    /// Task records.
    task_items (id) {
        /// Store-assigned identifier.
        id -> BigInt,
        /// Task title, at most 200 characters.
        title -> Text,
        /// Optional description, at most 1000 characters.
        description -> Nullable<Text>,
        /// Priority storage code.
        priority -> Integer,
        /// Status storage code.
        status -> Integer,
        /// Creation timestamp (UTC).
        created_at -> Timestamp,
        /// Optional due date (UTC).
        due_date -> Nullable<Timestamp>,
        /// Optional completion timestamp (UTC).
        completed_at -> Nullable<Timestamp>,
    }
}

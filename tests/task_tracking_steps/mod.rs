//! Step definitions for task tracking BDD scenarios.

pub mod when;

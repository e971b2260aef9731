//! Task tracking for Taskflow.
//!
//! Tasks carry priority, status, and due-date semantics. The service layer
//! validates input, stamps creation time, and derives status and overdue
//! views from the full task list. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

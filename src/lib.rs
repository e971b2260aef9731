//! Taskflow: task tracking core.
//!
//! This crate provides the task domain model and the service layer that
//! enforces its rules over a persistence abstraction. Presentation layers
//! call [`task::services::TaskService`] and supply a repository.
//!
//! # Architecture
//!
//! Taskflow follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `SQLite`)
//!
//! # Modules
//!
//! - [`task`]: Task records, repository contract, and task service
//! - [`config`]: Layered runtime configuration
//! - [`telemetry`]: Tracing subscriber setup
//! - [`bootstrap`]: Service wiring over `SQLite`

pub mod bootstrap;
pub mod config;
pub mod task;
pub mod telemetry;

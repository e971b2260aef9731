//! Builds a ready-to-use task service from configuration.

use crate::config::TaskFlowConfig;
use crate::task::{
    adapters::sqlite::{SqliteConnectionOptions, SqliteTaskRepository},
    ports::TaskRepositoryError,
    services::TaskService,
};
use crate::telemetry::{self, TelemetryError};
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::sync::Arc;
use thiserror::Error;

/// Task service backed by `SQLite` and the system clock.
pub type SqliteTaskService = TaskService<SqliteTaskRepository, DefaultClock>;

/// Errors raised while wiring the task service.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The connection pool could not be created.
    #[error("failed to open database '{url}': {source}")]
    Pool {
        /// Database URL from configuration.
        url: String,
        /// Underlying pool failure.
        source: diesel::r2d2::PoolError,
    },

    /// The schema could not be applied.
    #[error("failed to apply schema: {0}")]
    Schema(#[from] TaskRepositoryError),

    /// The tracing subscriber could not be installed.
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
}

/// Installs tracing with the configured `log_filter`, then opens the task
/// service.
///
/// `RUST_LOG` still takes precedence over `log_filter`. An existing global
/// subscriber is left in place.
///
/// # Errors
///
/// Returns [`BootstrapError::Telemetry`] when the log filter is malformed,
/// otherwise the errors of [`open_sqlite_service`].
pub async fn init(config: &TaskFlowConfig) -> Result<SqliteTaskService, BootstrapError> {
    let installed = telemetry::init_tracing(&config.log_filter)?;
    tracing::debug!(installed, log_filter = %config.log_filter, "tracing configured");
    open_sqlite_service(config).await
}

/// Opens the configured `SQLite` database, applies the schema, and returns a
/// task service over it.
///
/// # Errors
///
/// Returns [`BootstrapError`] when the database cannot be opened or the
/// schema cannot be applied.
pub async fn open_sqlite_service(config: &TaskFlowConfig) -> Result<SqliteTaskService, BootstrapError> {
    let manager = ConnectionManager::new(config.database_url.as_str());
    let pool = Pool::builder()
        .max_size(config.pool_size)
        .connection_customizer(Box::new(SqliteConnectionOptions))
        .build(manager)
        .map_err(|source| BootstrapError::Pool {
            url: config.database_url.clone(),
            source,
        })?;

    let repository = SqliteTaskRepository::new(pool);
    repository.apply_schema().await?;
    tracing::info!(database_url = %config.database_url, "task store ready");

    Ok(TaskService::new(Arc::new(repository), Arc::new(DefaultClock)))
}

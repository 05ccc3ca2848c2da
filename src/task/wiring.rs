//! Builds ready-to-use task APIs from [`WorkforceConfig`].

use std::sync::Arc;

use mockable::DefaultClock;
use thiserror::Error;
use tracing::info;

use crate::config::{AuditConfig, ConfigError, WorkforceConfig};
use crate::task::{
    adapters::{
        actor::StaticActor,
        memory::InMemoryTaskRepository,
        postgres::{PostgresTaskRepository, connect},
    },
    api::TaskApi,
    ports::{TaskRepository, TaskRepositoryError},
    services::TaskLifecycleService,
};

/// Task API backed by `PostgreSQL`.
pub type PostgresTaskApi = TaskApi<PostgresTaskRepository, DefaultClock, StaticActor>;

/// Task API backed by the in-memory repository.
pub type InMemoryTaskApi = TaskApi<InMemoryTaskRepository, DefaultClock, StaticActor>;

/// Errors raised while assembling a task API.
#[derive(Debug, Error)]
pub enum WiringError {
    /// Configuration is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The connection pool could not be built.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

fn service_over<R>(
    repository: Arc<R>,
    audit: &AuditConfig,
) -> Result<TaskLifecycleService<R, DefaultClock, StaticActor>, ConfigError>
where
    R: TaskRepository,
{
    let actor = StaticActor::new(audit.system_actor()?);
    Ok(
        TaskLifecycleService::new(repository, Arc::new(DefaultClock), Arc::new(actor))
            .with_audit_mode(audit.mode),
    )
}

/// Builds an API over a fresh in-memory repository.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] when the system actor is invalid.
pub fn in_memory_api(config: &WorkforceConfig) -> Result<InMemoryTaskApi, ConfigError> {
    let service = service_over(Arc::new(InMemoryTaskRepository::new()), &config.audit)?;
    Ok(TaskApi::new(service))
}

/// Connects to `PostgreSQL` and builds an API over it.
///
/// The schema must already be applied (see the `task_schema` binary).
///
/// # Errors
///
/// Returns [`WiringError::Config`] when the database section is incomplete
/// and [`WiringError::Repository`] when the pool cannot connect.
pub fn postgres_api(config: &WorkforceConfig) -> Result<PostgresTaskApi, WiringError> {
    let url = config.database.require_url()?;
    let pool = connect(url, config.database.max_connections)?;
    info!(
        max_connections = config.database.max_connections,
        audit_mode = ?config.audit.mode,
        "task store connected"
    );
    let service = service_over(Arc::new(PostgresTaskRepository::new(pool)), &config.audit)?;
    Ok(TaskApi::new(service))
}

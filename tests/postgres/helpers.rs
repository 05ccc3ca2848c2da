//! Shared test helpers for `PostgreSQL` integration tests.

use std::sync::{Arc, OnceLock};

use diesel::{Connection, PgConnection};
use mockable::DefaultClock;
use uuid::Uuid;
use workforce::task::{
    adapters::postgres::{PostgresTaskRepository, apply_migrations, connect},
    domain::{
        NEW_TASK_DESCRIPTION, Priority, ReferenceId, ReferenceType, Task, TaskAssignment,
        TaskKind, TaskReference, UserId,
    },
};

/// Boxed error type used by the suites.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Environment variable naming the test database.
pub const TEST_DATABASE_ENV: &str = "WORKFORCE_TEST_DATABASE_URL";

static MIGRATED: OnceLock<Result<(), String>> = OnceLock::new();

/// Connects to the test database, applying the schema once per process.
///
/// # Errors
///
/// Returns an error if [`TEST_DATABASE_ENV`] is unset or if the connection
/// or migration fails.
pub async fn repository() -> Result<Arc<PostgresTaskRepository>, BoxError> {
    let url = std::env::var(TEST_DATABASE_ENV)
        .map_err(|err| format!("{TEST_DATABASE_ENV} must name a test database: {err}"))?;
    let repository = tokio::task::spawn_blocking(move || -> Result<_, BoxError> {
        MIGRATED
            .get_or_init(|| {
                let mut connection =
                    PgConnection::establish(&url).map_err(|err| err.to_string())?;
                apply_migrations(&mut connection).map_err(|err| err.to_string())
            })
            .clone()?;
        let pool = connect(&url, 2)?;
        Ok(PostgresTaskRepository::new(pool))
    })
    .await??;
    Ok(Arc::new(repository))
}

/// Returns a positive identifier unlikely to collide with other test runs.
#[must_use]
pub fn unique_id() -> u64 {
    (Uuid::new_v4().as_u64_pair().0 >> 24) + 1
}

/// Builds an assigned task for a fresh order reference.
///
/// # Errors
///
/// Returns an error if an identifier or the assignment is rejected.
pub fn order_task(kind: TaskKind, assignee: u64) -> Result<Task, BoxError> {
    let reference = TaskReference::new(ReferenceId::new(unique_id())?, ReferenceType::Order);
    let assignment = TaskAssignment {
        reference,
        kind,
        assignee_id: UserId::new(assignee)?,
        priority: Priority::Medium,
        deadline: None,
    };
    Ok(Task::assign(assignment, NEW_TASK_DESCRIPTION, &DefaultClock)?)
}

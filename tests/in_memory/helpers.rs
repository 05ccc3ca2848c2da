//! Shared test helpers for in-memory task integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use workforce::task::{
    adapters::{actor::StaticActor, memory::InMemoryTaskRepository},
    api::{CreateTaskPayload, TaskApi, TaskSummary},
    domain::UserId,
    services::TaskLifecycleService,
};

/// API type exercised by the in-memory suites.
pub type TestApi = TaskApi<InMemoryTaskRepository, DefaultClock, StaticActor>;

/// User credited with every recorded activity.
pub const SYSTEM_ACTOR: u64 = 1;

/// Provides an API over a fresh in-memory repository.
///
/// # Panics
///
/// Panics if the system actor identifier is rejected.
#[fixture]
pub fn api() -> TestApi {
    let actor = UserId::new(SYSTEM_ACTOR).expect("valid system actor");
    TaskApi::new(TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
        Arc::new(StaticActor::new(actor)),
    ))
}

/// Builds a creation payload with default priority.
pub fn create_payload(
    reference_id: u64,
    reference_type: &str,
    task: &str,
    assignee_id: u64,
    deadline: Option<i64>,
) -> CreateTaskPayload {
    CreateTaskPayload {
        reference_id,
        reference_type: reference_type.to_owned(),
        task: task.to_owned(),
        assignee_id,
        priority: None,
        task_deadline_time: deadline,
    }
}

/// Creates tasks and returns their summaries.
///
/// # Errors
///
/// Returns an error if the API reports a failure.
pub async fn create(
    api: &TestApi,
    payloads: Vec<CreateTaskPayload>,
) -> Result<Vec<TaskSummary>, eyre::Report> {
    let response = api.create(payloads).await;
    eyre::ensure!(
        response.is_success(),
        "creation failed: {}",
        response.status.message
    );
    response
        .data
        .ok_or_else(|| eyre::eyre!("successful creation returned no summaries"))
}

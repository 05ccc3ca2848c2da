//! Lifecycle service flows over the `PostgreSQL` adapter.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::rstest;
use workforce::task::{
    adapters::{actor::StaticActor, postgres::PostgresTaskRepository},
    domain::{Activity, ActivityType, ReferenceType, Task, TaskKind, TaskStatus, UserId},
    services::{
        CreateTaskRequest, ReassignByReferenceRequest, TaskLifecycleService, UpdateTaskRequest,
    },
};

use crate::postgres::helpers::{BoxError, repository, unique_id};

type PgService = TaskLifecycleService<PostgresTaskRepository, DefaultClock, StaticActor>;

fn service_over(repository: Arc<PostgresTaskRepository>) -> Result<PgService, BoxError> {
    Ok(TaskLifecycleService::new(
        repository,
        Arc::new(DefaultClock),
        Arc::new(StaticActor::new(UserId::new(1)?)),
    ))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires WORKFORCE_TEST_DATABASE_URL"]
async fn reassignment_commits_cancellations_and_replacements() -> Result<(), BoxError> {
    let repository = repository().await?;
    let service = service_over(repository)?;
    let reference_id = unique_id();
    let created = service
        .create_tasks(vec![
            CreateTaskRequest::new(
                reference_id,
                ReferenceType::Entity,
                TaskKind::AssignCustomerToSalesPerson,
                5,
            )
            .with_deadline(1_700_000_000_000),
        ])
        .await?;
    let original = created.first().ok_or("task should be created")?;

    let outcome = service
        .reassign_by_reference(ReassignByReferenceRequest::new(
            reference_id,
            ReferenceType::Entity,
            9,
        ))
        .await?;

    assert_eq!(outcome.cancelled(), &[original.id()]);
    let retired = service.get_task(original.id()).await?;
    assert_eq!(retired.status(), TaskStatus::Cancelled);
    assert_eq!(retired.version(), 1);

    let replacement = outcome.created().first().ok_or("replacement expected")?;
    let details = service.get_details(replacement.id()).await?;
    assert_eq!(details.task.deadline(), original.deadline());
    let types: Vec<ActivityType> = details
        .activities
        .iter()
        .map(Activity::activity_type)
        .collect();
    assert_eq!(types, [ActivityType::Reassigned]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires WORKFORCE_TEST_DATABASE_URL"]
async fn repeated_update_in_one_batch_advances_version_once() -> Result<(), BoxError> {
    let repository = repository().await?;
    let service = service_over(repository)?;
    let created = service
        .create_tasks(vec![CreateTaskRequest::new(
            unique_id(),
            ReferenceType::Order,
            TaskKind::CreateInvoice,
            5,
        )])
        .await?;
    let task_id = created.first().ok_or("task should be created")?.id();

    let updated = service
        .update_tasks(vec![
            UpdateTaskRequest::new(task_id).with_description("Drafted"),
            UpdateTaskRequest::new(task_id).with_status(TaskStatus::Completed),
        ])
        .await?;

    let stored = service.get_task(task_id).await?;
    assert_eq!(stored.version(), 1);
    assert_eq!(stored.description(), "Drafted");
    assert_eq!(stored.status(), TaskStatus::Completed);
    assert_eq!(updated.last().map(Task::version), Some(1));
    Ok(())
}

//! `PostgreSQL` tests for change-set commits, versioning and history.

use mockable::DefaultClock;
use rstest::rstest;
use workforce::task::{
    domain::{Activity, ActivityType, Comment, Priority, TaskKind, TaskStatus, UserId},
    ports::{TaskChangeSet, TaskRepository, TaskRepositoryError},
};

use crate::postgres::helpers::{BoxError, order_task, repository};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires WORKFORCE_TEST_DATABASE_URL"]
async fn committed_task_round_trips() -> Result<(), BoxError> {
    let repository = repository().await?;
    let task = order_task(TaskKind::CreateInvoice, 5)?;
    let mut changes = TaskChangeSet::new();
    changes.insert(task.clone());
    repository.commit(changes).await?;

    let stored = repository
        .find_by_id(task.id())
        .await?
        .ok_or("task should be stored")?;
    assert_eq!(stored.reference(), task.reference());
    assert_eq!(stored.kind(), TaskKind::CreateInvoice);
    assert_eq!(stored.status(), TaskStatus::Assigned);
    assert_eq!(stored.priority(), Priority::Medium);
    assert_eq!(stored.version(), 0);

    let by_reference = repository.find_by_reference(task.reference()).await?;
    assert_eq!(by_reference.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires WORKFORCE_TEST_DATABASE_URL"]
async fn stale_update_is_rejected() -> Result<(), BoxError> {
    let repository = repository().await?;
    let task = order_task(TaskKind::ArrangePickup, 5)?;
    let mut insert = TaskChangeSet::new();
    insert.insert(task.clone());
    repository.commit(insert).await?;

    let mut first = task.clone();
    first.change_priority(Priority::High, &DefaultClock);
    let mut update = TaskChangeSet::new();
    update.update(first);
    repository.commit(update).await?;

    let mut stale = task.clone();
    stale.change_priority(Priority::Low, &DefaultClock);
    let mut conflicting = TaskChangeSet::new();
    conflicting.update(stale);
    let result = repository.commit(conflicting).await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::VersionConflict {
            expected: 0,
            actual: 1,
            ..
        })
    ));
    let stored = repository
        .find_by_id(task.id())
        .await?
        .ok_or("task should be stored")?;
    assert_eq!(stored.priority(), Priority::High);
    assert_eq!(stored.version(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires WORKFORCE_TEST_DATABASE_URL"]
async fn failed_commit_writes_nothing() -> Result<(), BoxError> {
    let repository = repository().await?;
    let task = order_task(TaskKind::CollectPayment, 5)?;
    let orphan = order_task(TaskKind::CollectPayment, 5)?;
    let mut changes = TaskChangeSet::new();
    changes
        .insert(task.clone())
        .record(Activity::created(&task, UserId::new(1)?, &DefaultClock))
        .record(Activity::created(&orphan, UserId::new(1)?, &DefaultClock));

    let result = repository.commit(changes).await;

    assert!(matches!(result, Err(TaskRepositoryError::MissingTask(id)) if id == orphan.id()));
    assert!(repository.find_by_id(task.id()).await?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires WORKFORCE_TEST_DATABASE_URL"]
async fn history_is_ordered_and_deleted_with_task() -> Result<(), BoxError> {
    let repository = repository().await?;
    let task = order_task(TaskKind::CreateInvoice, 5)?;
    let author = UserId::new(7)?;
    // History is stamped in the order it happens: creation, then each comment.
    let created = Activity::created(&task, UserId::new(1)?, &DefaultClock);
    let first = Comment::new(task.id(), "First note", author, &DefaultClock)?;
    let second = Comment::new(task.id(), "Second note", author, &DefaultClock)?;
    let mut changes = TaskChangeSet::new();
    changes
        .insert(task.clone())
        .record(created)
        .record(Activity::comment_added(&first))
        .record(Activity::comment_added(&second))
        .comment(first.clone())
        .comment(second.clone());
    repository.commit(changes).await?;

    let comments = repository.comments_for(task.id()).await?;
    let bodies: Vec<&str> = comments.iter().map(Comment::body).collect();
    assert_eq!(bodies, ["First note", "Second note"]);
    let activities = repository.activities_for(task.id()).await?;
    let types: Vec<ActivityType> = activities.iter().map(Activity::activity_type).collect();
    assert_eq!(
        types,
        [
            ActivityType::Created,
            ActivityType::CommentAdded,
            ActivityType::CommentAdded
        ]
    );
    assert_eq!(activities[1].description(), "Comment added by user 7: \"First note\"");
    assert_eq!(activities[2].description(), "Comment added by user 7: \"Second note\"");

    repository.delete(task.id()).await?;
    assert!(repository.activities_for(task.id()).await?.is_empty());
    assert!(repository.comments_for(task.id()).await?.is_empty());
    assert!(matches!(
        repository.delete(task.id()).await,
        Err(TaskRepositoryError::NotFound(_))
    ));
    Ok(())
}

//! End-to-end lifecycle flows through the payload API.

use super::helpers::{SYSTEM_ACTOR, TestApi, api, create, create_payload};
use rstest::rstest;
use workforce::task::{
    api::{AddCommentPayload, UpdatePriorityPayload, UpdateTaskPayload},
    domain::{ActivityType, Priority, TaskId, TaskStatus},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_journey_is_reflected_in_details(api: TestApi) -> Result<(), eyre::Report> {
    let created = create(
        &api,
        vec![create_payload(101, "ORDER", "CREATE_INVOICE", 5, Some(1_500))],
    )
    .await?;
    let task_id = created
        .first()
        .map(|summary| summary.task_id)
        .ok_or_else(|| eyre::eyre!("no task created"))?;

    let priority = api
        .update_priority(UpdatePriorityPayload {
            task_id,
            priority: "HIGH".to_owned(),
        })
        .await;
    eyre::ensure!(priority.is_success(), "{}", priority.status.message);

    let comment = api
        .add_comment(AddCommentPayload {
            task_id,
            comment_text: "Invoice sent to finance".to_owned(),
            user_id: 7,
        })
        .await;
    eyre::ensure!(comment.is_success(), "{}", comment.status.message);

    let update = api
        .update(vec![UpdateTaskPayload {
            task_id,
            task_status: Some("COMPLETED".to_owned()),
            description: None,
        }])
        .await;
    eyre::ensure!(update.is_success(), "{}", update.status.message);

    let details = api
        .get_details(task_id)
        .await
        .data
        .ok_or_else(|| eyre::eyre!("details missing"))?;
    assert_eq!(details.task.task_status, TaskStatus::Completed);
    assert_eq!(details.task.priority, Priority::High);

    let types: Vec<ActivityType> = details
        .activities
        .iter()
        .map(|activity| activity.activity_type)
        .collect();
    assert_eq!(
        types,
        [
            ActivityType::Created,
            ActivityType::PriorityChanged,
            ActivityType::CommentAdded,
            ActivityType::StatusChanged,
        ]
    );
    assert_eq!(details.activities[0].user_id, SYSTEM_ACTOR);
    assert_eq!(details.activities[2].user_id, 7);
    assert_eq!(details.comments.len(), 1);
    assert_eq!(details.comments[0].comment_text, "Invoice sent to finance");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_batch_member_leaves_no_trace(api: TestApi) -> Result<(), eyre::Report> {
    let response = api
        .create(vec![
            create_payload(101, "ORDER", "CREATE_INVOICE", 5, None),
            create_payload(101, "ORDER", "ASSIGN_CUSTOMER_TO_SALES_PERSON", 5, None),
        ])
        .await;
    assert_eq!(response.status.code, 400);

    let medium = api.find_by_priority("MEDIUM").await;
    let found = medium
        .data
        .ok_or_else(|| eyre::eyre!("priority lookup failed"))?;
    assert!(found.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn priority_lookup_spans_references(api: TestApi) -> Result<(), eyre::Report> {
    create(
        &api,
        vec![
            create_payload(101, "ORDER", "CREATE_INVOICE", 5, None),
            create_payload(201, "ENTITY", "ASSIGN_CUSTOMER_TO_SALES_PERSON", 6, None),
        ],
    )
    .await?;

    let found = api
        .find_by_priority("medium")
        .await
        .data
        .ok_or_else(|| eyre::eyre!("priority lookup failed"))?;
    assert_eq!(found.len(), 2);

    let urgent = api
        .find_by_priority("URGENT")
        .await
        .data
        .ok_or_else(|| eyre::eyre!("priority lookup failed"))?;
    assert!(urgent.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_task_is_reported_consistently(api: TestApi) {
    let missing = TaskId::new();
    let expected = format!("Task not found with id: {missing}");

    let by_id = api.get_by_id(missing).await;
    let details = api.get_details(missing).await;
    let priority = api
        .update_priority(UpdatePriorityPayload {
            task_id: missing,
            priority: "LOW".to_owned(),
        })
        .await;

    for status in [by_id.status, details.status, priority.status] {
        assert_eq!(status.code, 404);
        assert_eq!(status.message, expected);
    }
}

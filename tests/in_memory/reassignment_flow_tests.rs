//! Reassignment and deadline-window flows through the payload API.

use super::helpers::{TestApi, api, create, create_payload};
use rstest::rstest;
use workforce::task::{
    api::{FetchByDatePayload, ReassignPayload, TaskSummary, UpdateTaskPayload},
    domain::{TaskKind, TaskStatus},
};

async fn tasks_for(api: &TestApi, assignees: Vec<u64>) -> Result<Vec<TaskSummary>, eyre::Report> {
    api.fetch_by_date(FetchByDatePayload {
        assignee_ids: assignees,
        start_date: 0,
        end_date: i64::MAX,
    })
    .await
    .data
    .ok_or_else(|| eyre::eyre!("window query failed"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassignment_moves_open_work_to_new_owner(api: TestApi) -> Result<(), eyre::Report> {
    let original = create(
        &api,
        vec![create_payload(
            201,
            "ENTITY",
            "ASSIGN_CUSTOMER_TO_SALES_PERSON",
            5,
            Some(1_700_000_000_000),
        )],
    )
    .await?;

    let response = api
        .reassign(ReassignPayload {
            reference_id: 201,
            reference_type: "ENTITY".to_owned(),
            assignee_id: 9,
        })
        .await;
    assert_eq!(
        response.status.message,
        "Tasks reassigned successfully for reference 201"
    );

    let previous = api
        .get_by_id(original[0].task_id)
        .await
        .data
        .ok_or_else(|| eyre::eyre!("original task missing"))?;
    assert_eq!(previous.task_status, TaskStatus::Cancelled);

    let owned = tasks_for(&api, vec![9]).await?;
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].task, TaskKind::AssignCustomerToSalesPerson);
    assert_eq!(owned[0].task_status, TaskStatus::Assigned);
    assert_eq!(owned[0].task_deadline_time, Some(1_700_000_000_000));

    // Cancelled work never appears in window queries.
    assert!(tasks_for(&api, vec![5]).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn order_reassignment_leaves_completed_work(api: TestApi) -> Result<(), eyre::Report> {
    let created = create(
        &api,
        vec![create_payload(101, "ORDER", "COLLECT_PAYMENT", 5, Some(1_000))],
    )
    .await?;
    let done = api
        .update(vec![UpdateTaskPayload {
            task_id: created[0].task_id,
            task_status: Some("COMPLETED".to_owned()),
            description: None,
        }])
        .await;
    eyre::ensure!(done.is_success(), "{}", done.status.message);

    let response = api
        .reassign(ReassignPayload {
            reference_id: 101,
            reference_type: "order".to_owned(),
            assignee_id: 9,
        })
        .await;
    eyre::ensure!(response.is_success(), "{}", response.status.message);

    let completed = api
        .get_by_id(created[0].task_id)
        .await
        .data
        .ok_or_else(|| eyre::eyre!("completed task missing"))?;
    assert_eq!(completed.task_status, TaskStatus::Completed);
    assert_eq!(completed.assignee_id, 5);

    // Completed work is not carried over, so no replacement has a deadline.
    let owned = tasks_for(&api, vec![9]).await?;
    assert!(owned.is_empty());

    let replacements: Vec<TaskSummary> = api
        .find_by_priority("MEDIUM")
        .await
        .data
        .ok_or_else(|| eyre::eyre!("priority lookup failed"))?
        .into_iter()
        .filter(|summary| summary.assignee_id == 9)
        .collect();
    assert_eq!(replacements.len(), 3);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_assigned_tasks_stay_visible(api: TestApi) -> Result<(), eyre::Report> {
    create(
        &api,
        vec![
            create_payload(101, "ORDER", "CREATE_INVOICE", 5, Some(500)),
            create_payload(101, "ORDER", "ARRANGE_PICKUP", 5, Some(1_500)),
            create_payload(101, "ORDER", "COLLECT_PAYMENT", 5, Some(2_500)),
        ],
    )
    .await?;

    let visible = api
        .fetch_by_date(FetchByDatePayload {
            assignee_ids: vec![5],
            start_date: 1_000,
            end_date: 2_000,
        })
        .await
        .data
        .ok_or_else(|| eyre::eyre!("window query failed"))?;

    let mut kinds: Vec<TaskKind> = visible.iter().map(|summary| summary.task).collect();
    kinds.sort_by_key(|kind| kind.as_str());
    assert_eq!(kinds, [TaskKind::ArrangePickup, TaskKind::CreateInvoice]);
    Ok(())
}

//! Given steps for task reassignment BDD scenarios.

use super::world::{ReassignmentWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use workforce::task::{
    domain::{ReferenceType, Task, TaskKind, TaskStatus},
    services::{CreateTaskRequest, UpdateTaskRequest},
};

fn seed(world: &mut ReassignmentWorld, request: CreateTaskRequest) -> Result<(), eyre::Report> {
    let created = run_async(world.service.create_tasks(vec![request]))
        .wrap_err("create seeded task")?;
    world.seeded_task = created.into_iter().next();
    Ok(())
}

fn request(
    kind: &str,
    reference_type: &str,
    reference_id: u64,
    assignee: u64,
) -> Result<CreateTaskRequest, eyre::Report> {
    Ok(CreateTaskRequest::new(
        reference_id,
        ReferenceType::try_from(reference_type)?,
        TaskKind::try_from(kind)?,
        assignee,
    ))
}

#[given(
    r#"an assigned "{kind}" task for {reference_type} {reference_id:u64} owned by user {assignee:u64}"#
)]
fn assigned_task(
    world: &mut ReassignmentWorld,
    kind: String,
    reference_type: String,
    reference_id: u64,
    assignee: u64,
) -> Result<(), eyre::Report> {
    let request = request(&kind, &reference_type, reference_id, assignee)?;
    seed(world, request)
}

#[given(
    r#"an assigned "{kind}" task for {reference_type} {reference_id:u64} owned by user {assignee:u64} due at {deadline:i64}"#
)]
fn assigned_task_with_deadline(
    world: &mut ReassignmentWorld,
    kind: String,
    reference_type: String,
    reference_id: u64,
    assignee: u64,
    deadline: i64,
) -> Result<(), eyre::Report> {
    let request = request(&kind, &reference_type, reference_id, assignee)?.with_deadline(deadline);
    seed(world, request)
}

#[given(
    r#"a completed "{kind}" task for {reference_type} {reference_id:u64} owned by user {assignee:u64}"#
)]
fn completed_task(
    world: &mut ReassignmentWorld,
    kind: String,
    reference_type: String,
    reference_id: u64,
    assignee: u64,
) -> Result<(), eyre::Report> {
    let request = request(&kind, &reference_type, reference_id, assignee)?;
    seed(world, request)?;
    let task_id = world
        .seeded_task
        .as_ref()
        .map(Task::id)
        .ok_or_else(|| eyre::eyre!("missing seeded task in scenario world"))?;
    let completed = run_async(
        world
            .service
            .update_tasks(vec![UpdateTaskRequest::new(task_id).with_status(TaskStatus::Completed)]),
    )
    .wrap_err("complete seeded task")?;
    world.seeded_task = completed.into_iter().next();
    Ok(())
}

//! Then steps for task reassignment BDD scenarios.

use super::world::{ReassignmentWorld, run_async};
use rstest_bdd_macros::then;
use workforce::task::{
    domain::{Task, TaskStatus, UserId},
    ports::TaskRepository,
    services::{ErrorClass, ReassignmentOutcome},
};

fn outcome(world: &ReassignmentWorld) -> Result<&ReassignmentOutcome, eyre::Report> {
    world
        .last_reassignment
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing reassignment result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected reassignment failure: {err}"))
}

#[then("the seeded task is {status}")]
fn seeded_task_status(world: &ReassignmentWorld, status: String) -> Result<(), eyre::Report> {
    outcome(world)?;
    let expected = TaskStatus::try_from(status.as_str())?;
    let task_id = world
        .seeded_task
        .as_ref()
        .map(Task::id)
        .ok_or_else(|| eyre::eyre!("missing seeded task in scenario world"))?;
    let stored = run_async(world.service.get_task(task_id))?;
    eyre::ensure!(
        stored.status() == expected,
        "expected {expected}, found {}",
        stored.status()
    );
    Ok(())
}

#[then("user {assignee:u64} owns {count:usize} assigned task")]
fn assigned_task_count(
    world: &ReassignmentWorld,
    assignee: u64,
    count: usize,
) -> Result<(), eyre::Report> {
    let owned = run_async(world.repository.find_by_assignees(&[UserId::new(assignee)?]))?;
    let assigned = owned
        .iter()
        .filter(|task| task.status() == TaskStatus::Assigned)
        .count();
    eyre::ensure!(
        assigned == count,
        "expected {count} assigned tasks for user {assignee}, found {assigned}"
    );
    Ok(())
}

#[then(r#"the reassignment reports "{message}""#)]
fn reassignment_message(world: &ReassignmentWorld, message: String) -> Result<(), eyre::Report> {
    let reported = outcome(world)?.message();
    eyre::ensure!(reported == message, "unexpected message: {reported}");
    Ok(())
}

#[then("{count:usize} task is returned")]
fn fetched_count(world: &ReassignmentWorld, count: usize) -> Result<(), eyre::Report> {
    let fetched = world
        .last_fetch
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing fetch result in scenario world"))?
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected fetch failure: {err}"))?;
    eyre::ensure!(
        fetched.len() == count,
        "expected {count} tasks, found {}",
        fetched.len()
    );
    Ok(())
}

#[then("the query is rejected as an invalid argument")]
fn query_rejected(world: &ReassignmentWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_fetch
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing fetch result in scenario world"))?;
    match result {
        Err(err) if err.class() == ErrorClass::InvalidArgument => Ok(()),
        other => Err(eyre::eyre!("expected invalid argument, got {other:?}")),
    }
}

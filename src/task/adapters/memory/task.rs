//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Activity, Comment, Priority, Task, TaskId, TaskReference, UserId},
    ports::{TaskChangeSet, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
///
/// A single lock guards tasks and both history logs, so a committed change
/// set is observed either completely or not at all.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    reference_index: HashMap<TaskReference, Vec<TaskId>>,
    activities: Vec<Activity>,
    comments: Vec<Comment>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Checks every staged change against the current state without mutating it.
fn validate(state: &InMemoryTaskState, changes: &TaskChangeSet) -> TaskRepositoryResult<()> {
    let mut staged_ids = HashSet::new();
    for task in changes.inserted() {
        if state.tasks.contains_key(&task.id()) || !staged_ids.insert(task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
    }

    for task in changes.updated() {
        let stored = state
            .tasks
            .get(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        if stored.version() != task.version() {
            return Err(TaskRepositoryError::VersionConflict {
                task_id: task.id(),
                expected: task.version(),
                actual: stored.version(),
            });
        }
    }

    let known = |id: TaskId| state.tasks.contains_key(&id) || staged_ids.contains(&id);
    let history_owners = changes
        .activities()
        .iter()
        .map(Activity::task_id)
        .chain(changes.comments().iter().map(Comment::task_id));
    for owner in history_owners {
        if !known(owner) {
            return Err(TaskRepositoryError::MissingTask(owner));
        }
    }
    Ok(())
}

/// Sorts history records by timestamp; the stable sort keeps append order
/// for ties.
fn history_for<T: Clone, K: Ord>(
    records: &[T],
    belongs: impl Fn(&T) -> bool,
    timestamp: impl Fn(&T) -> K,
) -> Vec<T> {
    let mut selected: Vec<T> = records.iter().filter(|r| belongs(r)).cloned().collect();
    selected.sort_by_key(|record| timestamp(record));
    selected
}

fn collect_tasks(state: &InMemoryTaskState, predicate: impl Fn(&Task) -> bool) -> Vec<Task> {
    state
        .tasks
        .values()
        .filter(|task| predicate(task))
        .cloned()
        .collect()
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn commit(&self, changes: TaskChangeSet) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        validate(&state, &changes)?;

        let (inserted, updated, activities, comments) = changes.into_parts();
        for task in inserted {
            state
                .reference_index
                .entry(*task.reference())
                .or_default()
                .push(task.id());
            state.tasks.insert(task.id(), task);
        }
        for mut task in updated {
            task.record_commit();
            state.tasks.insert(task.id(), task);
        }
        state.activities.extend(activities);
        state.comments.extend(comments);
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_by_reference(
        &self,
        reference: &TaskReference,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        let tasks = state
            .reference_index
            .get(reference)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.tasks.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(tasks)
    }

    async fn find_by_assignees(&self, assignees: &[UserId]) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(collect_tasks(&state, |task| {
            assignees.contains(&task.assignee_id())
        }))
    }

    async fn find_by_priority(&self, priority: Priority) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(collect_tasks(&state, |task| task.priority() == priority))
    }

    async fn activities_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<Activity>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(history_for(
            &state.activities,
            |activity| activity.task_id() == task_id,
            Activity::occurred_at,
        ))
    }

    async fn comments_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<Comment>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(history_for(
            &state.comments,
            |comment| comment.task_id() == task_id,
            Comment::created_at,
        ))
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let task = state
            .tasks
            .remove(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;

        if let Some(ids) = state.reference_index.get_mut(task.reference()) {
            ids.retain(|indexed| *indexed != id);
            if ids.is_empty() {
                state.reference_index.remove(task.reference());
            }
        }
        state.activities.retain(|activity| activity.task_id() != id);
        state.comments.retain(|comment| comment.task_id() != id);
        Ok(())
    }
}

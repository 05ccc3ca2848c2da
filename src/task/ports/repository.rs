//! Repository port for task persistence, history logs, and lookup.

use crate::task::domain::{Activity, Comment, Priority, Task, TaskId, TaskReference, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Unit of work committed atomically by [`TaskRepository::commit`].
///
/// Updated tasks carry the version they were read at: the store accepts an
/// update only when that still matches the persisted version, then advances
/// it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChangeSet {
    inserted: Vec<Task>,
    updated: Vec<Task>,
    activities: Vec<Activity>,
    comments: Vec<Comment>,
}

impl TaskChangeSet {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stages a new task.
    pub fn insert(&mut self, task: Task) -> &mut Self {
        self.inserted.push(task);
        self
    }

    /// Stages a modified task.
    ///
    /// Staging the same task twice keeps only the latest state.
    pub fn update(&mut self, task: Task) -> &mut Self {
        if let Some(staged) = self
            .updated
            .iter_mut()
            .find(|staged| staged.id() == task.id())
        {
            *staged = task;
        } else {
            self.updated.push(task);
        }
        self
    }

    /// Stages an activity record.
    pub fn record(&mut self, activity: Activity) -> &mut Self {
        self.activities.push(activity);
        self
    }

    /// Stages a comment record.
    pub fn comment(&mut self, comment: Comment) -> &mut Self {
        self.comments.push(comment);
        self
    }

    /// Returns staged new tasks.
    #[must_use]
    pub fn inserted(&self) -> &[Task] {
        &self.inserted
    }

    /// Returns staged task updates.
    #[must_use]
    pub fn updated(&self) -> &[Task] {
        &self.updated
    }

    /// Returns staged activity records, in append order.
    #[must_use]
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Returns staged comment records, in append order.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Consumes the change set, returning inserted tasks, updated tasks,
    /// activities and comments.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Task>, Vec<Task>, Vec<Activity>, Vec<Comment>) {
        (self.inserted, self.updated, self.activities, self.comments)
    }

    /// Returns `true` when nothing is staged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty()
            && self.updated.is_empty()
            && self.activities.is_empty()
            && self.comments.is_empty()
    }
}

/// Task persistence contract.
///
/// Implementations own three logical stores: task records, the append-only
/// activity log and the append-only comment log. History records reference
/// their task by identifier and are removed only when the task is deleted.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Atomically applies a change set: either every staged change persists
    /// or none does.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when an inserted task
    /// already exists, [`TaskRepositoryError::NotFound`] when an updated task
    /// does not exist, [`TaskRepositoryError::VersionConflict`] when an update
    /// was based on a stale read, or [`TaskRepositoryError::MissingTask`] when
    /// a history record refers to an unknown task.
    async fn commit(&self, changes: TaskChangeSet) -> TaskRepositoryResult<()>;

    /// Finds a task by internal task identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns every task raised against the given reference, in any status.
    async fn find_by_reference(
        &self,
        reference: &TaskReference,
    ) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns every task currently owned by one of the given users.
    async fn find_by_assignees(&self, assignees: &[UserId]) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns every task with the given priority.
    async fn find_by_priority(&self, priority: Priority) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns the activity history of a task, oldest first.
    ///
    /// Records sharing a timestamp keep their append order.
    async fn activities_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<Activity>>;

    /// Returns the comment history of a task, oldest first.
    ///
    /// Records sharing a timestamp keep their append order.
    async fn comments_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<Comment>>;

    /// Deletes a task together with its activities and comments.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task changed since it was read.
    #[error("task {task_id} was modified concurrently (expected version {expected}, found {actual})")]
    VersionConflict {
        /// Task whose update was rejected.
        task_id: TaskId,
        /// Version the update was based on.
        expected: u64,
        /// Version currently stored.
        actual: u64,
    },

    /// A history record refers to a task that does not exist.
    #[error("history record refers to unknown task: {0}")]
    MissingTask(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

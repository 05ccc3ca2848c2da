//! Priority changes, comments and detail aggregation.

use super::{TaskLifecycleResult, TaskLifecycleService};
use crate::task::{
    domain::{Activity, Comment, Priority, Task, TaskDetails, TaskId, UserId},
    ports::{ActorProvider, TaskChangeSet, TaskRepository},
};
use mockable::Clock;
use std::slice;
use tracing::{info, instrument};

/// Request payload for attaching a comment to a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommentRequest {
    text: String,
    author_id: u64,
}

impl AddCommentRequest {
    /// Creates a comment request.
    #[must_use]
    pub fn new(text: impl Into<String>, author_id: u64) -> Self {
        Self {
            text: text.into(),
            author_id,
        }
    }
}

impl<R, C, A> TaskLifecycleService<R, C, A>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    A: ActorProvider,
{
    /// Replaces a task's priority and records the change.
    ///
    /// A `PRIORITY_CHANGED` activity is appended even when the priority is
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::NotFound`] when the task does not
    /// exist, or a repository error when the commit is rejected.
    #[instrument(skip(self))]
    pub async fn change_priority(
        &self,
        task_id: TaskId,
        priority: Priority,
    ) -> TaskLifecycleResult<Task> {
        let actor = self.actor.current_actor();
        let mut task = self.load_task(task_id).await?;
        let previous = task.change_priority(priority, &*self.clock);

        let mut changes = TaskChangeSet::new();
        changes
            .update(task.clone())
            .record(Activity::priority_changed(
                task_id,
                previous,
                priority,
                actor,
                &*self.clock,
            ));
        self.commit(changes, slice::from_mut(&mut task)).await?;

        info!(%task_id, from = %previous, to = %priority, "task priority changed");
        Ok(task)
    }

    /// Attaches a comment to a task and records a `COMMENT_ADDED` activity
    /// stamped with the comment's timestamp.
    ///
    /// Returns the task unchanged; fetch [`Self::get_details`] to see the
    /// comment.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::Domain`] for a blank text or an
    /// invalid author, and [`super::TaskLifecycleError::NotFound`] when the
    /// task does not exist.
    #[instrument(skip(self, request), fields(author_id = request.author_id))]
    pub async fn add_comment(
        &self,
        task_id: TaskId,
        request: AddCommentRequest,
    ) -> TaskLifecycleResult<Task> {
        let author_id = UserId::new(request.author_id)?;
        let task = self.load_task(task_id).await?;
        let comment = Comment::new(task_id, request.text, author_id, &*self.clock)?;

        let mut changes = TaskChangeSet::new();
        changes
            .record(Activity::comment_added(&comment))
            .comment(comment);
        self.repository.commit(changes).await?;

        info!(%task_id, "comment added");
        Ok(task)
    }

    /// Returns a task with its activity and comment histories, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::NotFound`] when the task does not
    /// exist.
    #[instrument(skip(self))]
    pub async fn get_details(&self, task_id: TaskId) -> TaskLifecycleResult<TaskDetails> {
        let task = self.load_task(task_id).await?;
        let activities = self.repository.activities_for(task_id).await?;
        let comments = self.repository.comments_for(task_id).await?;
        Ok(TaskDetails {
            task,
            activities,
            comments,
        })
    }
}

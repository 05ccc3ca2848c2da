//! Immutable audit entries recorded whenever task state changes.

use super::{
    ActivityId, Comment, ParseActivityTypeError, Priority, Task, TaskId, TaskStatus, UserId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of change an [`Activity`] records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    /// A task was created.
    Created,
    /// A task's free-text fields changed.
    Updated,
    /// A task was assigned to a user with no open predecessor.
    Assigned,
    /// A task replaced an open predecessor under a new assignee.
    Reassigned,
    /// A task's status changed.
    StatusChanged,
    /// A task's priority changed.
    PriorityChanged,
    /// A comment was attached to a task.
    CommentAdded,
}

impl ActivityType {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Updated => "UPDATED",
            Self::Assigned => "ASSIGNED",
            Self::Reassigned => "REASSIGNED",
            Self::StatusChanged => "STATUS_CHANGED",
            Self::PriorityChanged => "PRIORITY_CHANGED",
            Self::CommentAdded => "COMMENT_ADDED",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ActivityType {
    type Error = ParseActivityTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "CREATED" => Ok(Self::Created),
            "UPDATED" => Ok(Self::Updated),
            "ASSIGNED" => Ok(Self::Assigned),
            "REASSIGNED" => Ok(Self::Reassigned),
            "STATUS_CHANGED" => Ok(Self::StatusChanged),
            "PRIORITY_CHANGED" => Ok(Self::PriorityChanged),
            "COMMENT_ADDED" => Ok(Self::CommentAdded),
            _ => Err(ParseActivityTypeError(value.to_owned())),
        }
    }
}

/// Immutable audit entry owned by a single task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    id: ActivityId,
    task_id: TaskId,
    activity_type: ActivityType,
    description: String,
    actor_id: UserId,
    occurred_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedActivityData {
    /// Persisted activity identifier.
    pub id: ActivityId,
    /// Owning task.
    pub task_id: TaskId,
    /// Recorded change kind.
    pub activity_type: ActivityType,
    /// Human-readable summary.
    pub description: String,
    /// User the change is attributed to.
    pub actor_id: UserId,
    /// When the change happened.
    pub occurred_at: DateTime<Utc>,
}

impl Activity {
    fn record(
        task_id: TaskId,
        activity_type: ActivityType,
        description: String,
        actor_id: UserId,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ActivityId::new(),
            task_id,
            activity_type,
            description,
            actor_id,
            occurred_at,
        }
    }

    /// Records the creation of `task`.
    #[must_use]
    pub fn created(task: &Task, actor_id: UserId, clock: &impl Clock) -> Self {
        Self::record(
            task.id(),
            ActivityType::Created,
            format!("Task created and assigned to user {}", task.assignee_id()),
            actor_id,
            clock.utc(),
        )
    }

    /// Records a description-only update of `task`.
    #[must_use]
    pub fn updated(task: &Task, actor_id: UserId, clock: &impl Clock) -> Self {
        Self::record(
            task.id(),
            ActivityType::Updated,
            "Task description updated".to_owned(),
            actor_id,
            clock.utc(),
        )
    }

    /// Records that `task` was handed to its assignee.
    ///
    /// `replaced_open_work` selects [`ActivityType::Reassigned`] over
    /// [`ActivityType::Assigned`].
    #[must_use]
    pub fn assigned(
        task: &Task,
        replaced_open_work: bool,
        actor_id: UserId,
        clock: &impl Clock,
    ) -> Self {
        let (activity_type, verb) = if replaced_open_work {
            (ActivityType::Reassigned, "reassigned")
        } else {
            (ActivityType::Assigned, "assigned")
        };
        Self::record(
            task.id(),
            activity_type,
            format!("Task {verb} to user {}", task.assignee_id()),
            actor_id,
            clock.utc(),
        )
    }

    /// Records a status transition.
    #[must_use]
    pub fn status_changed(
        task_id: TaskId,
        from: TaskStatus,
        to: TaskStatus,
        actor_id: UserId,
        clock: &impl Clock,
    ) -> Self {
        Self::record(
            task_id,
            ActivityType::StatusChanged,
            format!("Task status changed from {from} to {to}"),
            actor_id,
            clock.utc(),
        )
    }

    /// Records a priority change.
    #[must_use]
    pub fn priority_changed(
        task_id: TaskId,
        from: Priority,
        to: Priority,
        actor_id: UserId,
        clock: &impl Clock,
    ) -> Self {
        Self::record(
            task_id,
            ActivityType::PriorityChanged,
            format!("Task priority changed from {from} to {to}"),
            actor_id,
            clock.utc(),
        )
    }

    /// Records that `comment` was attached, sharing its timestamp.
    #[must_use]
    pub fn comment_added(comment: &Comment) -> Self {
        Self::record(
            comment.task_id(),
            ActivityType::CommentAdded,
            format!(
                "Comment added by user {}: \"{}\"",
                comment.author_id(),
                comment.body()
            ),
            comment.author_id(),
            comment.created_at(),
        )
    }

    /// Reconstructs an activity from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedActivityData) -> Self {
        Self {
            id: data.id,
            task_id: data.task_id,
            activity_type: data.activity_type,
            description: data.description,
            actor_id: data.actor_id,
            occurred_at: data.occurred_at,
        }
    }

    /// Returns the activity identifier.
    #[must_use]
    pub const fn id(&self) -> ActivityId {
        self.id
    }

    /// Returns the owning task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the recorded change kind.
    #[must_use]
    pub const fn activity_type(&self) -> ActivityType {
        self.activity_type
    }

    /// Returns the human-readable summary.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the user the change is attributed to.
    #[must_use]
    pub const fn actor_id(&self) -> UserId {
        self.actor_id
    }

    /// Returns when the change happened.
    #[must_use]
    pub const fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

//! Read models returned by [`super::TaskApi`].

use crate::task::domain::{
    Activity, ActivityId, ActivityType, Comment, CommentId, EpochMillis, Priority, ReferenceType,
    Task, TaskDetails, TaskId, TaskKind, TaskStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flat summary of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSummary {
    /// Task identifier.
    pub task_id: TaskId,
    /// External business object identifier.
    pub reference_id: u64,
    /// External business object type.
    pub reference_type: ReferenceType,
    /// Task kind.
    pub task: TaskKind,
    /// Human-readable kind title.
    pub task_title: String,
    /// Lifecycle status.
    pub task_status: TaskStatus,
    /// Current owner.
    pub assignee_id: u64,
    /// Priority.
    pub priority: Priority,
    /// Deadline in epoch milliseconds.
    pub task_deadline_time: Option<i64>,
    /// Free-text description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskSummary {
    fn from(task: &Task) -> Self {
        Self {
            task_id: task.id(),
            reference_id: task.reference().reference_id().value(),
            reference_type: task.reference().reference_type(),
            task: task.kind(),
            task_title: task.kind().title().to_owned(),
            task_status: task.status(),
            assignee_id: task.assignee_id().value(),
            priority: task.priority(),
            task_deadline_time: task.deadline().map(EpochMillis::value),
            description: task.description().to_owned(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// One activity history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityView {
    /// Activity identifier.
    pub activity_id: ActivityId,
    /// Kind of change.
    pub activity_type: ActivityType,
    /// Human-readable summary.
    pub description: String,
    /// Acting user.
    pub user_id: u64,
    /// When the change happened.
    pub timestamp: DateTime<Utc>,
}

impl From<&Activity> for ActivityView {
    fn from(activity: &Activity) -> Self {
        Self {
            activity_id: activity.id(),
            activity_type: activity.activity_type(),
            description: activity.description().to_owned(),
            user_id: activity.actor_id().value(),
            timestamp: activity.occurred_at(),
        }
    }
}

/// One comment history entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentView {
    /// Comment identifier.
    pub comment_id: CommentId,
    /// Comment text.
    pub comment_text: String,
    /// Comment author.
    pub user_id: u64,
    /// When the comment was made.
    pub timestamp: DateTime<Utc>,
}

impl From<&Comment> for CommentView {
    fn from(comment: &Comment) -> Self {
        Self {
            comment_id: comment.id(),
            comment_text: comment.body().to_owned(),
            user_id: comment.author_id().value(),
            timestamp: comment.created_at(),
        }
    }
}

/// Task summary with embedded histories, oldest entries first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetailsView {
    /// The task itself.
    #[serde(flatten)]
    pub task: TaskSummary,
    /// Activity history.
    pub activities: Vec<ActivityView>,
    /// Comment history.
    pub comments: Vec<CommentView>,
}

impl From<&TaskDetails> for TaskDetailsView {
    fn from(details: &TaskDetails) -> Self {
        Self {
            task: TaskSummary::from(&details.task),
            activities: details.activities.iter().map(ActivityView::from).collect(),
            comments: details.comments.iter().map(CommentView::from).collect(),
        }
    }
}

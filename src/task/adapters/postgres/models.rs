//! Diesel row models for task persistence.

use super::schema::{task_activities, task_comments, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// External business object identifier.
    pub reference_id: i64,
    /// External business object type label.
    pub reference_type: String,
    /// Task kind label.
    pub kind: String,
    /// Lifecycle status label.
    pub status: String,
    /// Current owner.
    pub assignee_id: i64,
    /// Priority label.
    pub priority: String,
    /// Deadline in epoch milliseconds.
    pub deadline_ms: Option<i64>,
    /// Free-text description.
    pub description: String,
    /// Optimistic-concurrency version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// External business object identifier.
    pub reference_id: i64,
    /// External business object type label.
    pub reference_type: String,
    /// Task kind label.
    pub kind: String,
    /// Lifecycle status label.
    pub status: String,
    /// Current owner.
    pub assignee_id: i64,
    /// Priority label.
    pub priority: String,
    /// Deadline in epoch milliseconds.
    pub deadline_ms: Option<i64>,
    /// Free-text description.
    pub description: String,
    /// Optimistic-concurrency version.
    pub version: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Mutable task columns written by an update.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangesRow {
    /// Lifecycle status label.
    pub status: String,
    /// Current owner.
    pub assignee_id: i64,
    /// Priority label.
    pub priority: String,
    /// Deadline in epoch milliseconds.
    pub deadline_ms: Option<i64>,
    /// Free-text description.
    pub description: String,
    /// Version after the update.
    pub version: i64,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for activity records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_activities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActivityRow {
    /// Activity identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Activity type label.
    pub activity_type: String,
    /// Human-readable summary.
    pub description: String,
    /// Acting user.
    pub actor_id: i64,
    /// When the change happened.
    pub occurred_at: DateTime<Utc>,
}

/// Insert model for activity records; `sequence` is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_activities)]
pub struct NewActivityRow {
    /// Activity identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Activity type label.
    pub activity_type: String,
    /// Human-readable summary.
    pub description: String,
    /// Acting user.
    pub actor_id: i64,
    /// When the change happened.
    pub occurred_at: DateTime<Utc>,
}

/// Query result row for comment records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Comment text.
    pub body: String,
    /// Comment author.
    pub author_id: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Insert model for comment records; `sequence` is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_comments)]
pub struct NewCommentRow {
    /// Comment identifier.
    pub id: uuid::Uuid,
    /// Owning task.
    pub task_id: uuid::Uuid,
    /// Comment text.
    pub body: String,
    /// Comment author.
    pub author_id: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

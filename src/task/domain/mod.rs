//! Domain model for task lifecycle management.
//!
//! Tasks serve external business references (orders, entities), move
//! between assignment statuses, and own append-only activity and comment
//! histories. All infrastructure concerns stay outside the domain boundary.

mod activity;
mod catalog;
mod comment;
mod deadline;
mod error;
mod ids;
mod status;
mod task;

pub use activity::{Activity, ActivityType, PersistedActivityData};
pub use catalog::{ReferenceType, TaskKind, TaskReference};
pub use comment::{Comment, PersistedCommentData};
pub use deadline::{DeadlineWindow, EpochMillis};
pub use error::{
    ParseActivityTypeError, ParseCatalogError, ParsePriorityError, ParseTaskStatusError,
    TaskDomainError,
};
pub use ids::{ActivityId, CommentId, ReferenceId, TaskId, UserId};
pub use status::{Priority, TaskStatus};
pub use task::{
    FieldUpdateOutcome, NEW_TASK_DESCRIPTION, PersistedTaskData, REASSIGNED_TASK_DESCRIPTION,
    Task, TaskAssignment, TaskDetails, TaskFieldUpdate,
};

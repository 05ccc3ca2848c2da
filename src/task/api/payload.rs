//! Wire payloads accepted by [`super::TaskApi`].
//!
//! Enumerated values arrive as labels so that an unknown label surfaces as
//! an invalid-argument response instead of a decoding failure.

use crate::task::{
    domain::{
        ParseCatalogError, ParsePriorityError, ParseTaskStatusError, Priority, ReferenceType,
        TaskId, TaskKind, TaskStatus,
    },
    services::{
        AddCommentRequest, CreateTaskRequest, FetchByDateRequest, ReassignByReferenceRequest,
        UpdateTaskRequest,
    },
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while translating payload labels into domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// Reference type or task kind label is unknown.
    #[error(transparent)]
    Catalog(#[from] ParseCatalogError),
    /// Status label is unknown.
    #[error(transparent)]
    Status(#[from] ParseTaskStatusError),
    /// Priority label is unknown.
    #[error(transparent)]
    Priority(#[from] ParsePriorityError),
}

/// One task to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTaskPayload {
    /// External business object identifier.
    pub reference_id: u64,
    /// External business object type label, e.g. `ORDER`.
    pub reference_type: String,
    /// Task kind label, e.g. `CREATE_INVOICE`.
    pub task: String,
    /// Initial owner.
    pub assignee_id: u64,
    /// Priority label; `MEDIUM` when absent.
    #[serde(default)]
    pub priority: Option<String>,
    /// Deadline in epoch milliseconds.
    #[serde(default)]
    pub task_deadline_time: Option<i64>,
}

impl TryFrom<CreateTaskPayload> for CreateTaskRequest {
    type Error = PayloadError;

    fn try_from(payload: CreateTaskPayload) -> Result<Self, Self::Error> {
        let mut request = Self::new(
            payload.reference_id,
            ReferenceType::try_from(payload.reference_type.as_str())?,
            TaskKind::try_from(payload.task.as_str())?,
            payload.assignee_id,
        );
        if let Some(label) = payload.priority {
            request = request.with_priority(Priority::try_from(label.as_str())?);
        }
        if let Some(deadline) = payload.task_deadline_time {
            request = request.with_deadline(deadline);
        }
        Ok(request)
    }
}

/// Partial update of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTaskPayload {
    /// Task to update.
    pub task_id: TaskId,
    /// Replacement status label.
    #[serde(default)]
    pub task_status: Option<String>,
    /// Replacement description.
    #[serde(default)]
    pub description: Option<String>,
}

impl TryFrom<UpdateTaskPayload> for UpdateTaskRequest {
    type Error = PayloadError;

    fn try_from(payload: UpdateTaskPayload) -> Result<Self, Self::Error> {
        let mut request = Self::new(payload.task_id);
        if let Some(label) = payload.task_status {
            request = request.with_status(TaskStatus::try_from(label.as_str())?);
        }
        if let Some(description) = payload.description {
            request = request.with_description(description);
        }
        Ok(request)
    }
}

/// Hand a reference's work to a new assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReassignPayload {
    /// External business object identifier.
    pub reference_id: u64,
    /// External business object type label.
    pub reference_type: String,
    /// New owner.
    pub assignee_id: u64,
}

impl TryFrom<ReassignPayload> for ReassignByReferenceRequest {
    type Error = PayloadError;

    fn try_from(payload: ReassignPayload) -> Result<Self, Self::Error> {
        Ok(Self::new(
            payload.reference_id,
            ReferenceType::try_from(payload.reference_type.as_str())?,
            payload.assignee_id,
        ))
    }
}

/// Deadline-window query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchByDatePayload {
    /// Owners whose tasks are considered.
    pub assignee_ids: Vec<u64>,
    /// Inclusive window start in epoch milliseconds.
    pub start_date: i64,
    /// Inclusive window end in epoch milliseconds.
    pub end_date: i64,
}

impl From<FetchByDatePayload> for FetchByDateRequest {
    fn from(payload: FetchByDatePayload) -> Self {
        Self::new(payload.assignee_ids, payload.start_date, payload.end_date)
    }
}

/// Priority change for one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePriorityPayload {
    /// Task to update.
    pub task_id: TaskId,
    /// New priority label.
    pub priority: String,
}

/// Comment on one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCommentPayload {
    /// Task to annotate.
    pub task_id: TaskId,
    /// Comment text.
    pub comment_text: String,
    /// Comment author.
    pub user_id: u64,
}

impl From<AddCommentPayload> for AddCommentRequest {
    fn from(payload: AddCommentPayload) -> Self {
        Self::new(payload.comment_text, payload.user_id)
    }
}

//! Presentation boundary for the task lifecycle service.
//!
//! [`TaskApi`] accepts serde payloads, delegates to
//! [`TaskLifecycleService`] and wraps every outcome in an [`ApiResponse`]
//! envelope whose status code reflects the error class. Transport (HTTP or
//! otherwise) is left to the embedding application.

mod payload;
mod view;

pub use payload::{
    AddCommentPayload, CreateTaskPayload, FetchByDatePayload, PayloadError, ReassignPayload,
    UpdatePriorityPayload, UpdateTaskPayload,
};
pub use view::{ActivityView, CommentView, TaskDetailsView, TaskSummary};

use std::sync::Arc;

use crate::task::{
    adapters::actor::RequestContext,
    domain::{Priority, TaskId},
    ports::{ActorProvider, TaskRepository},
    services::{
        AddCommentRequest, CreateTaskRequest, ErrorClass, FetchByDateRequest,
        ReassignByReferenceRequest, TaskLifecycleError, TaskLifecycleService, UpdateTaskRequest,
    },
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Status code reported for successful calls.
pub const STATUS_OK: u16 = 200;

/// Outcome status of an API call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus {
    /// HTTP-style status code.
    pub code: u16,
    /// Human-readable outcome.
    pub message: String,
}

/// Response envelope returned by every [`TaskApi`] call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Payload on success.
    pub data: Option<T>,
    /// Outcome status.
    pub status: ApiStatus,
}

impl<T> ApiResponse<T> {
    /// Builds a successful response.
    #[must_use]
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            status: ApiStatus {
                code: STATUS_OK,
                message: message.into(),
            },
        }
    }

    /// Builds a successful response without a payload.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            data: None,
            status: ApiStatus {
                code: STATUS_OK,
                message: message.into(),
            },
        }
    }

    /// Builds a failed response for an error of the given class.
    #[must_use]
    pub fn failure(class: ErrorClass, message: impl Into<String>) -> Self {
        Self {
            data: None,
            status: ApiStatus {
                code: status_code(class),
                message: message.into(),
            },
        }
    }

    /// Returns `true` when the call succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status.code == STATUS_OK
    }
}

/// Maps an error class to its HTTP-style status code.
#[must_use]
pub const fn status_code(class: ErrorClass) -> u16 {
    match class {
        ErrorClass::NotFound => 404,
        ErrorClass::InvalidArgument => 400,
        ErrorClass::Conflict => 409,
        ErrorClass::Internal => 500,
    }
}

#[derive(Debug, Error)]
enum ApiError {
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error(transparent)]
    Service(#[from] TaskLifecycleError),
}

impl ApiError {
    const fn class(&self) -> ErrorClass {
        match self {
            Self::Payload(_) => ErrorClass::InvalidArgument,
            Self::Service(err) => err.class(),
        }
    }
}

fn respond<T>(result: Result<T, ApiError>, message: &str) -> ApiResponse<T> {
    match result {
        Ok(data) => ApiResponse::ok(data, message),
        Err(err) => reject(&err),
    }
}

fn reject<T>(err: &ApiError) -> ApiResponse<T> {
    let class = err.class();
    warn!(?class, error = %err, "task request failed");
    ApiResponse::failure(class, err.to_string())
}

/// Payload-level facade over [`TaskLifecycleService`].
#[derive(Clone)]
pub struct TaskApi<R, C, A>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    A: ActorProvider,
{
    service: TaskLifecycleService<R, C, A>,
}

impl<R, C, A> TaskApi<R, C, A>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    A: ActorProvider,
{
    /// Wraps a lifecycle service.
    #[must_use]
    pub const fn new(service: TaskLifecycleService<R, C, A>) -> Self {
        Self { service }
    }

    /// Returns an API over the same store that attributes every activity to
    /// the user carried by `context`.
    #[must_use]
    pub fn for_request(&self, context: RequestContext) -> TaskApi<R, C, RequestContext> {
        TaskApi {
            service: self.service.with_actor(Arc::new(context)),
        }
    }

    /// Creates tasks and returns their summaries in request order.
    pub async fn create(&self, payloads: Vec<CreateTaskPayload>) -> ApiResponse<Vec<TaskSummary>> {
        let result = async {
            let requests = payloads
                .into_iter()
                .map(CreateTaskRequest::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            let tasks = self.service.create_tasks(requests).await?;
            Ok::<_, ApiError>(tasks.iter().map(TaskSummary::from).collect())
        }
        .await;
        respond(result, "Tasks created successfully")
    }

    /// Applies partial updates and returns the updated summaries.
    pub async fn update(&self, payloads: Vec<UpdateTaskPayload>) -> ApiResponse<Vec<TaskSummary>> {
        let result = async {
            let requests = payloads
                .into_iter()
                .map(UpdateTaskRequest::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            let tasks = self.service.update_tasks(requests).await?;
            Ok::<_, ApiError>(tasks.iter().map(TaskSummary::from).collect())
        }
        .await;
        respond(result, "Tasks updated successfully")
    }

    /// Reassigns a reference and reports the confirmation message.
    pub async fn reassign(&self, payload: ReassignPayload) -> ApiResponse<()> {
        let result = async {
            let request = ReassignByReferenceRequest::try_from(payload)?;
            Ok::<_, ApiError>(self.service.reassign_by_reference(request).await?)
        }
        .await;
        match result {
            Ok(outcome) => ApiResponse::message(outcome.message()),
            Err(err) => reject(&err),
        }
    }

    /// Returns the summaries visible in a deadline window.
    pub async fn fetch_by_date(&self, payload: FetchByDatePayload) -> ApiResponse<Vec<TaskSummary>> {
        let result = self
            .service
            .fetch_by_date(FetchByDateRequest::from(payload))
            .await
            .map(|tasks| tasks.iter().map(TaskSummary::from).collect())
            .map_err(ApiError::from);
        respond(result, "Tasks fetched successfully")
    }

    /// Returns one task summary.
    pub async fn get_by_id(&self, task_id: TaskId) -> ApiResponse<TaskSummary> {
        let result = self
            .service
            .get_task(task_id)
            .await
            .map(|task| TaskSummary::from(&task))
            .map_err(ApiError::from);
        respond(result, "Task fetched successfully")
    }

    /// Changes a task's priority and returns its summary.
    pub async fn update_priority(&self, payload: UpdatePriorityPayload) -> ApiResponse<TaskSummary> {
        let result = async {
            let priority = Priority::try_from(payload.priority.as_str()).map_err(PayloadError::from)?;
            let task = self.service.change_priority(payload.task_id, priority).await?;
            Ok::<_, ApiError>(TaskSummary::from(&task))
        }
        .await;
        respond(result, "Task priority updated successfully")
    }

    /// Returns the summaries of every task with the given priority label.
    pub async fn find_by_priority(&self, label: &str) -> ApiResponse<Vec<TaskSummary>> {
        let result = self
            .service
            .find_by_priority(label)
            .await
            .map(|tasks| tasks.iter().map(TaskSummary::from).collect())
            .map_err(ApiError::from);
        respond(result, "Tasks fetched successfully")
    }

    /// Attaches a comment and returns the task summary.
    pub async fn add_comment(&self, payload: AddCommentPayload) -> ApiResponse<TaskSummary> {
        let task_id = payload.task_id;
        let result = self
            .service
            .add_comment(task_id, AddCommentRequest::from(payload))
            .await
            .map(|task| TaskSummary::from(&task))
            .map_err(ApiError::from);
        respond(result, "Comment added successfully")
    }

    /// Returns a task summary with its activity and comment histories.
    pub async fn get_details(&self, task_id: TaskId) -> ApiResponse<TaskDetailsView> {
        let result = self
            .service
            .get_details(task_id)
            .await
            .map(|details| TaskDetailsView::from(&details))
            .map_err(ApiError::from);
        respond(result, "Task details fetched successfully")
    }
}

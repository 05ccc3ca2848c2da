//! Service layer for task creation, field updates and single-task access.
//!
//! Reassignment, annotation and deadline queries live in submodules that
//! extend [`TaskLifecycleService`] with further operations.

mod history;
mod query;
mod reassignment;

pub use history::AddCommentRequest;
pub use query::FetchByDateRequest;
pub use reassignment::{ReassignByReferenceRequest, ReassignmentOutcome};

use crate::task::{
    domain::{
        Activity, EpochMillis, FieldUpdateOutcome, NEW_TASK_DESCRIPTION, ParsePriorityError,
        Priority, ReferenceId, ReferenceType, Task, TaskAssignment, TaskDomainError,
        TaskFieldUpdate, TaskId, TaskKind, TaskReference, TaskStatus, UserId,
    },
    ports::{ActorProvider, TaskChangeSet, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, hash_map::Entry};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Which state changes append activity records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditMode {
    /// Creation and field updates are recorded alongside reassignment,
    /// priority changes and comments.
    #[default]
    Complete,
    /// Creation and plain field updates leave no activity record.
    Legacy,
}

impl AuditMode {
    /// Returns `true` when creation and field updates are recorded.
    #[must_use]
    pub const fn records_field_changes(self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Request payload for creating one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateTaskRequest {
    reference_id: u64,
    reference_type: ReferenceType,
    kind: TaskKind,
    assignee_id: u64,
    priority: Priority,
    deadline: Option<i64>,
}

impl CreateTaskRequest {
    /// Creates a request with the required assignment fields, medium
    /// priority and no deadline.
    #[must_use]
    pub const fn new(
        reference_id: u64,
        reference_type: ReferenceType,
        kind: TaskKind,
        assignee_id: u64,
    ) -> Self {
        Self {
            reference_id,
            reference_type,
            kind,
            assignee_id,
            priority: Priority::Medium,
            deadline: None,
        }
    }

    /// Sets the initial priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the deadline in epoch milliseconds.
    #[must_use]
    pub const fn with_deadline(mut self, deadline_ms: i64) -> Self {
        self.deadline = Some(deadline_ms);
        self
    }

    fn into_assignment(self) -> Result<TaskAssignment, TaskDomainError> {
        Ok(TaskAssignment {
            reference: TaskReference::new(
                ReferenceId::new(self.reference_id)?,
                self.reference_type,
            ),
            kind: self.kind,
            assignee_id: UserId::new(self.assignee_id)?,
            priority: self.priority,
            deadline: self.deadline.map(EpochMillis::new),
        })
    }
}

/// Request payload for a partial field update of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    task_id: TaskId,
    status: Option<TaskStatus>,
    description: Option<String>,
}

impl UpdateTaskRequest {
    /// Creates an update that changes nothing yet.
    #[must_use]
    pub const fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            status: None,
            description: None,
        }
    }

    /// Sets the replacement status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the targeted task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// A priority label did not name a known priority.
    #[error(transparent)]
    InvalidPriority(#[from] ParsePriorityError),

    /// No task exists with the given identifier.
    #[error("Task not found with id: {0}")]
    NotFound(TaskId),

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Coarse error classification used at the presentation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// The addressed task does not exist.
    NotFound,
    /// The request carried invalid data.
    InvalidArgument,
    /// The request raced with a concurrent change.
    Conflict,
    /// Storage or infrastructure failure.
    Internal,
}

impl TaskLifecycleError {
    /// Classifies the error for boundary mapping.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Domain(_) | Self::InvalidPriority(_) => ErrorClass::InvalidArgument,
            Self::NotFound(_) | Self::Repository(TaskRepositoryError::NotFound(_)) => {
                ErrorClass::NotFound
            }
            Self::Repository(
                TaskRepositoryError::VersionConflict { .. } | TaskRepositoryError::DuplicateTask(_),
            ) => ErrorClass::Conflict,
            Self::Repository(_) => ErrorClass::Internal,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Every operation resolves and validates all of its input before staging
/// changes, then commits one [`TaskChangeSet`], so a failing item leaves the
/// store untouched.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C, A>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    A: ActorProvider,
{
    repository: Arc<R>,
    clock: Arc<C>,
    actor: Arc<A>,
    audit_mode: AuditMode,
}

impl<R, C, A> TaskLifecycleService<R, C, A>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    A: ActorProvider,
{
    /// Creates a new task lifecycle service recording in
    /// [`AuditMode::Complete`].
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>, actor: Arc<A>) -> Self {
        Self {
            repository,
            clock,
            actor,
            audit_mode: AuditMode::Complete,
        }
    }

    /// Selects which state changes append activity records.
    #[must_use]
    pub const fn with_audit_mode(mut self, audit_mode: AuditMode) -> Self {
        self.audit_mode = audit_mode;
        self
    }

    /// Returns a service sharing this one's store and clock but attributing
    /// activities to `actor`.
    #[must_use]
    pub fn with_actor<B: ActorProvider>(&self, actor: Arc<B>) -> TaskLifecycleService<R, C, B> {
        TaskLifecycleService {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
            actor,
            audit_mode: self.audit_mode,
        }
    }

    /// Returns the configured audit mode.
    #[must_use]
    pub const fn audit_mode(&self) -> AuditMode {
        self.audit_mode
    }

    /// Creates one assigned task per request, in request order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when any request carries an
    /// invalid identifier or a kind that does not apply to its reference
    /// type; nothing is stored in that case.
    #[instrument(skip_all, fields(count = requests.len()))]
    pub async fn create_tasks(
        &self,
        requests: Vec<CreateTaskRequest>,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let actor = self.actor.current_actor();
        let mut changes = TaskChangeSet::new();
        let mut created = Vec::with_capacity(requests.len());

        for request in requests {
            let task = Task::assign(
                request.into_assignment()?,
                NEW_TASK_DESCRIPTION,
                &*self.clock,
            )?;
            if self.audit_mode.records_field_changes() {
                changes.record(Activity::created(&task, actor, &*self.clock));
            }
            changes.insert(task.clone());
            created.push(task);
        }

        self.repository.commit(changes).await?;
        info!(created = created.len(), "tasks created");
        Ok(created)
    }

    /// Applies partial field updates and returns each task's state after its
    /// update, in request order.
    ///
    /// A task named twice receives both updates in order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when any named task is
    /// unknown, or a repository error when the commit is rejected.
    #[instrument(skip_all, fields(count = requests.len()))]
    pub async fn update_tasks(
        &self,
        requests: Vec<UpdateTaskRequest>,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let actor = self.actor.current_actor();
        let mut working: HashMap<TaskId, Task> = HashMap::new();
        for request in &requests {
            if let Entry::Vacant(slot) = working.entry(request.task_id) {
                slot.insert(self.load_task(request.task_id).await?);
            }
        }

        let mut changes = TaskChangeSet::new();
        let mut updated = Vec::with_capacity(requests.len());
        for request in requests {
            let UpdateTaskRequest {
                task_id,
                status,
                description,
            } = request;
            let task = working
                .get_mut(&task_id)
                .ok_or(TaskLifecycleError::NotFound(task_id))?;

            let outcome = task.apply_update(TaskFieldUpdate { status, description }, &*self.clock);
            debug!(%task_id, ?outcome, "task fields applied");
            if outcome != FieldUpdateOutcome::Unchanged {
                if let Some(activity) = self.field_update_activity(task, outcome, actor) {
                    changes.record(activity);
                }
                changes.update(task.clone());
            }
            updated.push(task.clone());
        }

        self.commit(changes, &mut updated).await?;
        info!(updated = updated.len(), "tasks updated");
        Ok(updated)
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist.
    #[instrument(skip(self))]
    pub async fn get_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.load_task(task_id).await
    }

    /// Deletes a task together with its activity and comment histories.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist.
    #[instrument(skip(self))]
    pub async fn delete_task(&self, task_id: TaskId) -> TaskLifecycleResult<()> {
        self.repository
            .delete(task_id)
            .await
            .map_err(|err| match err {
                TaskRepositoryError::NotFound(id) => TaskLifecycleError::NotFound(id),
                other => TaskLifecycleError::Repository(other),
            })?;
        info!(%task_id, "task deleted");
        Ok(())
    }

    async fn load_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))
    }

    /// Commits `changes` and advances the version of every returned task the
    /// store updated.
    async fn commit(&self, changes: TaskChangeSet, tasks: &mut [Task]) -> TaskLifecycleResult<()> {
        let updated: HashSet<TaskId> = changes.updated().iter().map(Task::id).collect();
        self.repository.commit(changes).await?;
        for task in tasks.iter_mut().filter(|task| updated.contains(&task.id())) {
            task.record_commit();
        }
        Ok(())
    }

    fn field_update_activity(
        &self,
        task: &Task,
        outcome: FieldUpdateOutcome,
        actor: UserId,
    ) -> Option<Activity> {
        if !self.audit_mode.records_field_changes() {
            return None;
        }
        match outcome {
            FieldUpdateOutcome::Unchanged => None,
            FieldUpdateOutcome::StatusChanged { from, to } => Some(Activity::status_changed(
                task.id(),
                from,
                to,
                actor,
                &*self.clock,
            )),
            FieldUpdateOutcome::DescriptionChanged => {
                Some(Activity::updated(task, actor, &*self.clock))
            }
        }
    }
}

//! Reassignment of every applicable task kind on one reference.

use super::{TaskLifecycleResult, TaskLifecycleService};
use crate::task::{
    domain::{
        Activity, Priority, REASSIGNED_TASK_DESCRIPTION, ReferenceId, ReferenceType, Task,
        TaskAssignment, TaskId, TaskKind, TaskReference, TaskStatus, UserId,
    },
    ports::{ActorProvider, TaskChangeSet, TaskRepository},
};
use mockable::Clock;
use tracing::{debug, info, instrument};

/// Request payload for handing a reference's work to a new assignee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReassignByReferenceRequest {
    reference_id: u64,
    reference_type: ReferenceType,
    assignee_id: u64,
}

impl ReassignByReferenceRequest {
    /// Creates a reassignment request.
    #[must_use]
    pub const fn new(reference_id: u64, reference_type: ReferenceType, assignee_id: u64) -> Self {
        Self {
            reference_id,
            reference_type,
            assignee_id,
        }
    }
}

/// What a reassignment retired and created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignmentOutcome {
    reference: TaskReference,
    cancelled: Vec<TaskId>,
    created: Vec<Task>,
}

impl ReassignmentOutcome {
    /// Returns the reassigned reference.
    #[must_use]
    pub const fn reference(&self) -> &TaskReference {
        &self.reference
    }

    /// Returns the tasks moved to `CANCELLED`.
    #[must_use]
    pub fn cancelled(&self) -> &[TaskId] {
        &self.cancelled
    }

    /// Returns the replacement tasks, one per applicable kind.
    #[must_use]
    pub fn created(&self) -> &[Task] {
        &self.created
    }

    /// Returns the confirmation message reported to callers.
    #[must_use]
    pub fn message(&self) -> String {
        format!(
            "Tasks reassigned successfully for reference {}",
            self.reference.reference_id()
        )
    }
}

impl<R, C, A> TaskLifecycleService<R, C, A>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    A: ActorProvider,
{
    /// Hands every applicable kind of work on a reference to a new assignee.
    ///
    /// For each kind the catalog lists for the reference type, every task
    /// that is not completed is retired (assigned ones become cancelled) and
    /// one fresh assigned task is created. The replacement keeps the priority
    /// and deadline of the most recently updated retired task. All changes
    /// commit together.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::Domain`] for invalid identifiers
    /// and a repository error when the commit is rejected, for example
    /// because a concurrent request already retired the same tasks.
    #[instrument(skip_all, fields(
        reference_id = request.reference_id,
        reference_type = %request.reference_type,
        assignee_id = request.assignee_id,
    ))]
    pub async fn reassign_by_reference(
        &self,
        request: ReassignByReferenceRequest,
    ) -> TaskLifecycleResult<ReassignmentOutcome> {
        let reference = TaskReference::new(
            ReferenceId::new(request.reference_id)?,
            request.reference_type,
        );
        let assignee_id = UserId::new(request.assignee_id)?;
        let actor = self.actor.current_actor();
        let existing = self.repository.find_by_reference(&reference).await?;

        let mut changes = TaskChangeSet::new();
        let mut cancelled = Vec::new();
        let mut created = Vec::new();
        for kind in reference.reference_type().applicable_kinds() {
            let open: Vec<&Task> = existing
                .iter()
                .filter(|task| task.kind() == kind && task.is_open())
                .collect();
            let predecessor = open.iter().copied().max_by_key(|task| task.updated_at());

            for task in &open {
                let mut retired = (*task).clone();
                if let Some(previous) = retired.cancel(&*self.clock) {
                    changes.record(Activity::status_changed(
                        retired.id(),
                        previous,
                        TaskStatus::Cancelled,
                        actor,
                        &*self.clock,
                    ));
                    cancelled.push(retired.id());
                    changes.update(retired);
                }
            }

            let replacement = self.replacement_task(reference, kind, assignee_id, predecessor)?;
            changes.record(Activity::assigned(
                &replacement,
                predecessor.is_some(),
                actor,
                &*self.clock,
            ));
            debug!(%kind, task_id = %replacement.id(), retired = open.len(), "kind reassigned");
            changes.insert(replacement.clone());
            created.push(replacement);
        }

        self.repository.commit(changes).await?;
        info!(
            cancelled = cancelled.len(),
            created = created.len(),
            "reference reassigned"
        );
        Ok(ReassignmentOutcome {
            reference,
            cancelled,
            created,
        })
    }

    fn replacement_task(
        &self,
        reference: TaskReference,
        kind: TaskKind,
        assignee_id: UserId,
        predecessor: Option<&Task>,
    ) -> TaskLifecycleResult<Task> {
        let assignment = TaskAssignment {
            reference,
            kind,
            assignee_id,
            priority: predecessor.map_or_else(Priority::default, Task::priority),
            deadline: predecessor.and_then(Task::deadline),
        };
        Ok(Task::assign(
            assignment,
            REASSIGNED_TASK_DESCRIPTION,
            &*self.clock,
        )?)
    }
}

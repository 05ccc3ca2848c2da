//! Task aggregate root and the field updates it accepts.

use super::{
    Activity, Comment, DeadlineWindow, EpochMillis, Priority, TaskDomainError, TaskId, TaskKind,
    TaskReference, TaskStatus, UserId,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Description given to tasks created through the creation path.
pub const NEW_TASK_DESCRIPTION: &str = "New task created.";

/// Description given to replacement tasks created by reassignment.
pub const REASSIGNED_TASK_DESCRIPTION: &str = "Task reassigned to new user.";

/// Parameter object describing who owns a new task and what it is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskAssignment {
    /// External business object the task serves.
    pub reference: TaskReference,
    /// Catalog kind of work.
    pub kind: TaskKind,
    /// Initial owner.
    pub assignee_id: UserId,
    /// Initial priority.
    pub priority: Priority,
    /// Due time, if known.
    pub deadline: Option<EpochMillis>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    reference: TaskReference,
    kind: TaskKind,
    status: TaskStatus,
    assignee_id: UserId,
    priority: Priority,
    deadline: Option<EpochMillis>,
    description: String,
    version: u64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted external reference.
    pub reference: TaskReference,
    /// Persisted task kind.
    pub kind: TaskKind,
    /// Persisted lifecycle status.
    pub status: TaskStatus,
    /// Persisted assignee.
    pub assignee_id: UserId,
    /// Persisted priority.
    pub priority: Priority,
    /// Persisted deadline, if any.
    pub deadline: Option<EpochMillis>,
    /// Persisted description.
    pub description: String,
    /// Persisted optimistic-concurrency version.
    pub version: u64,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A task together with its full activity and comment histories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    /// The task itself.
    pub task: Task,
    /// Activity history, oldest first.
    pub activities: Vec<Activity>,
    /// Comment history, oldest first.
    pub comments: Vec<Comment>,
}

/// Partial field update; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFieldUpdate {
    /// Replacement status.
    pub status: Option<TaskStatus>,
    /// Replacement description.
    pub description: Option<String>,
}

/// What a [`TaskFieldUpdate`] actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdateOutcome {
    /// Nothing differed from the stored values.
    Unchanged,
    /// The status moved, possibly alongside the description.
    StatusChanged {
        /// Status before the update.
        from: TaskStatus,
        /// Status after the update.
        to: TaskStatus,
    },
    /// Only the description changed.
    DescriptionChanged,
}

impl Task {
    /// Creates a new assigned task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::KindNotApplicable`] when the catalog does
    /// not list `assignment.kind` for the reference type.
    pub fn assign(
        assignment: TaskAssignment,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TaskDomainError> {
        let TaskAssignment {
            reference,
            kind,
            assignee_id,
            priority,
            deadline,
        } = assignment;

        if !kind.applies_to(reference.reference_type()) {
            return Err(TaskDomainError::KindNotApplicable {
                kind,
                reference_type: reference.reference_type(),
            });
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            reference,
            kind,
            status: TaskStatus::Assigned,
            assignee_id,
            priority,
            deadline,
            description: description.into(),
            version: 0,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            reference: data.reference,
            kind: data.kind,
            status: data.status,
            assignee_id: data.assignee_id,
            priority: data.priority,
            deadline: data.deadline,
            description: data.description,
            version: data.version,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the external reference.
    #[must_use]
    pub const fn reference(&self) -> &TaskReference {
        &self.reference
    }

    /// Returns the task kind.
    #[must_use]
    pub const fn kind(&self) -> TaskKind {
        self.kind
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the current owner.
    #[must_use]
    pub const fn assignee_id(&self) -> UserId {
        self.assignee_id
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<EpochMillis> {
        self.deadline
    }

    /// Returns the free-text description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the version of the stored record this state derives from.
    ///
    /// New tasks start at zero; the store advances the version on every
    /// committed update and rejects updates based on a stale version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Advances the version after the store accepted an update.
    pub(crate) const fn record_commit(&mut self) {
        self.version += 1;
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` while the task can still be retired by reassignment.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status != TaskStatus::Completed
    }

    /// Returns `true` when the task belongs in a deadline-window view.
    #[must_use]
    pub const fn is_visible_in(&self, window: &DeadlineWindow) -> bool {
        window.admits(self.status, self.deadline)
    }

    /// Applies a partial field update.
    ///
    /// The modification timestamp only moves when something changed.
    pub fn apply_update(
        &mut self,
        update: TaskFieldUpdate,
        clock: &impl Clock,
    ) -> FieldUpdateOutcome {
        let previous_status = self.status;
        let mut description_changed = false;

        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(description) = update.description {
            if description != self.description {
                self.description = description;
                description_changed = true;
            }
        }

        let outcome = if previous_status != self.status {
            FieldUpdateOutcome::StatusChanged {
                from: previous_status,
                to: self.status,
            }
        } else if description_changed {
            FieldUpdateOutcome::DescriptionChanged
        } else {
            FieldUpdateOutcome::Unchanged
        };

        if outcome != FieldUpdateOutcome::Unchanged {
            self.touch(clock);
        }
        outcome
    }

    /// Replaces the priority and returns the previous value.
    pub fn change_priority(&mut self, priority: Priority, clock: &impl Clock) -> Priority {
        let previous = self.priority;
        self.priority = priority;
        self.touch(clock);
        previous
    }

    /// Moves the task to [`TaskStatus::Cancelled`].
    ///
    /// Returns the previous status, or `None` if the task was already
    /// cancelled and nothing changed.
    pub fn cancel(&mut self, clock: &impl Clock) -> Option<TaskStatus> {
        if self.status == TaskStatus::Cancelled {
            return None;
        }
        let previous = self.status;
        self.status = TaskStatus::Cancelled;
        self.touch(clock);
        Some(previous)
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

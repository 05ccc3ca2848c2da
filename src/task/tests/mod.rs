//! Unit tests for task lifecycle management.


use crate::task::{
    adapters::{actor::StaticActor, memory::InMemoryTaskRepository},
    domain::{
        EpochMillis, PersistedTaskData, Priority, ReferenceId, ReferenceType, Task, TaskId,
        TaskKind, TaskReference, TaskStatus, UserId,
    },
    ports::{TaskChangeSet, TaskRepository},
    services::TaskLifecycleService,
};
use chrono::{DateTime, Duration, Utc};
use mockable::DefaultClock;
use std::sync::Arc;

type TestService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock, StaticActor>;

/// User credited with activities by [`service_over`].
const ACTOR: u64 = 900;

fn user(value: u64) -> UserId {
    UserId::new(value).expect("valid user id")
}

fn reference(id: u64, reference_type: ReferenceType) -> TaskReference {
    TaskReference::new(ReferenceId::new(id).expect("valid reference id"), reference_type)
}

fn service_over(repository: Arc<InMemoryTaskRepository>) -> TestService {
    TaskLifecycleService::new(
        repository,
        Arc::new(DefaultClock),
        Arc::new(StaticActor::new(user(ACTOR))),
    )
}

/// Builds a stored-looking task whose timestamps sit `age_minutes` in the
/// past.
struct SeedTask {
    reference: TaskReference,
    kind: TaskKind,
    status: TaskStatus,
    assignee: u64,
    priority: Priority,
    deadline: Option<i64>,
    age_minutes: i64,
}

impl SeedTask {
    fn new(reference: TaskReference, kind: TaskKind) -> Self {
        Self {
            reference,
            kind,
            status: TaskStatus::Assigned,
            assignee: 5,
            priority: Priority::Medium,
            deadline: None,
            age_minutes: 10,
        }
    }

    fn status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    fn assignee(mut self, assignee: u64) -> Self {
        self.assignee = assignee;
        self
    }

    fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    fn deadline(mut self, deadline: i64) -> Self {
        self.deadline = Some(deadline);
        self
    }

    fn age_minutes(mut self, age_minutes: i64) -> Self {
        self.age_minutes = age_minutes;
        self
    }

    fn build(self) -> Task {
        let timestamp: DateTime<Utc> = Utc::now() - Duration::minutes(self.age_minutes);
        Task::from_persisted(PersistedTaskData {
            id: TaskId::new(),
            reference: self.reference,
            kind: self.kind,
            status: self.status,
            assignee_id: user(self.assignee),
            priority: self.priority,
            deadline: self.deadline.map(EpochMillis::new),
            description: "Seeded task.".to_owned(),
            version: 0,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }
}

async fn seed(repository: &InMemoryTaskRepository, tasks: &[Task]) {
    let mut changes = TaskChangeSet::new();
    for task in tasks {
        changes.insert(task.clone());
    }
    repository
        .commit(changes)
        .await
        .expect("seed tasks should be stored");
}

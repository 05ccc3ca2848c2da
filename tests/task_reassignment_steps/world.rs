//! Shared world state for task reassignment BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use workforce::task::{
    adapters::{actor::StaticActor, memory::InMemoryTaskRepository},
    domain::{Task, UserId},
    services::{ReassignmentOutcome, TaskLifecycleError, TaskLifecycleService},
};

/// Service type used by the BDD world.
pub type TestTaskService =
    TaskLifecycleService<InMemoryTaskRepository, DefaultClock, StaticActor>;

/// Scenario world for reassignment behaviour tests.
pub struct ReassignmentWorld {
    pub repository: Arc<InMemoryTaskRepository>,
    pub service: TestTaskService,
    pub seeded_task: Option<Task>,
    pub last_reassignment: Option<Result<ReassignmentOutcome, TaskLifecycleError>>,
    pub last_fetch: Option<Result<Vec<Task>, TaskLifecycleError>>,
}

impl ReassignmentWorld {
    /// Creates a world over an empty repository.
    ///
    /// # Panics
    ///
    /// Panics if the system actor identifier is rejected.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryTaskRepository::new());
        let actor = UserId::new(1).expect("valid system actor");
        let service = TaskLifecycleService::new(
            Arc::clone(&repository),
            Arc::new(DefaultClock),
            Arc::new(StaticActor::new(actor)),
        );
        Self {
            repository,
            service,
            seeded_task: None,
            last_reassignment: None,
            last_fetch: None,
        }
    }
}

impl Default for ReassignmentWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ReassignmentWorld {
    ReassignmentWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod actor;
pub mod repository;

pub use actor::ActorProvider;
pub use repository::{TaskChangeSet, TaskRepository, TaskRepositoryError, TaskRepositoryResult};

#[cfg(test)]
pub use actor::MockActorProvider;
#[cfg(test)]
pub use repository::MockTaskRepository;

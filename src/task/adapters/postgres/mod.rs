//! `PostgreSQL` adapters for task lifecycle persistence.

mod migrations;
mod models;
mod repository;
mod schema;

pub use migrations::{MIGRATIONS, Migration, apply_migrations, revert_migrations};
pub use repository::{PostgresTaskRepository, TaskPgPool, connect};

//! Embedded SQL migrations for the task schema.

use diesel::connection::SimpleConnection;
use diesel::pg::PgConnection;
use diesel::result::QueryResult;

/// A single schema migration with forward and reverse SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    /// Directory name under `migrations/`.
    pub name: &'static str,
    /// SQL applied when migrating forward.
    pub up: &'static str,
    /// SQL applied when reverting.
    pub down: &'static str,
}

/// All task schema migrations in application order.
pub const MIGRATIONS: &[Migration] = &[Migration {
    name: "2026-10-01-000000_create_task_tables",
    up: include_str!("../../../../migrations/2026-10-01-000000_create_task_tables/up.sql"),
    down: include_str!("../../../../migrations/2026-10-01-000000_create_task_tables/down.sql"),
}];

/// Applies every migration in order.
///
/// The SQL is idempotent, so running it against an already-migrated database
/// is harmless.
///
/// # Errors
///
/// Returns the Diesel error raised by the first failing statement.
pub fn apply_migrations(connection: &mut PgConnection) -> QueryResult<()> {
    for migration in MIGRATIONS {
        connection.batch_execute(migration.up)?;
    }
    Ok(())
}

/// Reverts every migration in reverse order.
///
/// # Errors
///
/// Returns the Diesel error raised by the first failing statement.
pub fn revert_migrations(connection: &mut PgConnection) -> QueryResult<()> {
    for migration in MIGRATIONS.iter().rev() {
        connection.batch_execute(migration.down)?;
    }
    Ok(())
}

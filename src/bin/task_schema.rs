//! Applies, reverts or lists the task schema migrations.
//!
//! Usage:
//!
//! ```text
//! task_schema <operation>
//! ```
//!
//! The `operation` must be `apply`, `revert`, or `list`. The database URL is
//! read from `WORKFORCE_DATABASE__URL` (or `database.url` in
//! `workforce.toml`); a `.env` file in the working directory is honoured.

use diesel::{Connection, PgConnection};
use std::env;
use thiserror::Error;
use tracing::info;
use workforce::config::{ConfigError, WorkforceConfig};
use workforce::task::adapters::postgres::{MIGRATIONS, apply_migrations, revert_migrations};
use workforce::telemetry::{TelemetryError, init_tracing};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
enum SchemaError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("database connection failed: {0}")]
    Connection(#[from] diesel::ConnectionError),
    #[error("migration failed: {0}")]
    Migration(#[from] diesel::result::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Apply,
    Revert,
    List,
}

impl Operation {
    fn parse(arg: &str) -> Result<Self, SchemaError> {
        match arg {
            "apply" => Ok(Self::Apply),
            "revert" => Ok(Self::Revert),
            "list" => Ok(Self::List),
            other => Err(SchemaError::InvalidArgs(format!(
                "unknown operation '{other}'; expected apply, revert, or list"
            ))),
        }
    }
}

fn main() -> Result<(), BoxError> {
    let args = collect_args()?;
    run(args.into_iter()).map_err(Into::into)
}

fn collect_args() -> Result<Vec<String>, SchemaError> {
    env::args_os()
        .skip(1)
        .map(|arg_os| {
            arg_os
                .into_string()
                .map_err(|_| SchemaError::InvalidArgs("argument is not valid UTF-8".into()))
        })
        .collect()
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Operation, SchemaError> {
    let operation = args
        .next()
        .ok_or_else(|| SchemaError::InvalidArgs("missing operation argument".into()))?;
    if let Some(extra) = args.next() {
        return Err(SchemaError::InvalidArgs(format!(
            "unexpected extra argument: {extra}; expected exactly one operation"
        )));
    }
    Operation::parse(&operation)
}

fn run(args: impl Iterator<Item = String>) -> Result<(), SchemaError> {
    let operation = parse_args(args)?;
    let config = WorkforceConfig::load_with_dotenv()?;
    init_tracing(&config.telemetry)?;

    if operation == Operation::List {
        for migration in MIGRATIONS {
            info!(name = migration.name, "migration");
        }
        return Ok(());
    }

    let mut connection = PgConnection::establish(config.database.require_url()?)?;
    match operation {
        Operation::Apply => apply_migrations(&mut connection)?,
        Operation::Revert => revert_migrations(&mut connection)?,
        Operation::List => {}
    }
    info!(?operation, migrations = MIGRATIONS.len(), "task schema updated");
    Ok(())
}

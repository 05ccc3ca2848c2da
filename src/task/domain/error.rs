//! Error types for task domain validation and parsing.

use super::{ReferenceType, TaskKind};
use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The external reference identifier is invalid.
    #[error("invalid reference id {0}, expected a positive integer")]
    InvalidReferenceId(u64),

    /// The user identifier is invalid.
    #[error("invalid user id {0}, expected a positive integer")]
    InvalidUserId(u64),

    /// The task kind is not part of the catalog for the reference type.
    #[error("task kind {kind} does not apply to reference type {reference_type}")]
    KindNotApplicable {
        /// Requested task kind.
        kind: TaskKind,
        /// Reference type the task was requested for.
        reference_type: ReferenceType,
    },

    /// The deadline window ends before it starts.
    #[error("invalid deadline window: start {start} is after end {end}")]
    InvalidDeadlineWindow {
        /// Window start in epoch milliseconds.
        start: i64,
        /// Window end in epoch milliseconds.
        end: i64,
    },

    /// The comment body is empty after trimming.
    #[error("comment text must not be empty")]
    EmptyComment,
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing priority labels.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown priority: {0}")]
pub struct ParsePriorityError(pub String);

/// Error returned while parsing catalog labels (reference types and kinds).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {catalog} label: {label}")]
pub struct ParseCatalogError {
    /// Catalog that rejected the label.
    pub catalog: &'static str,
    /// Offending label.
    pub label: String,
}

/// Error returned while parsing activity types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown activity type: {0}")]
pub struct ParseActivityTypeError(pub String);

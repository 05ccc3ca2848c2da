//! Deadline timestamps and the date-window visibility rule.

use super::{TaskDomainError, TaskStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Point in time expressed as milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpochMillis(i64);

impl EpochMillis {
    /// Wraps a millisecond timestamp.
    #[must_use]
    pub const fn new(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the raw millisecond value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EpochMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inclusive `[start, end]` window used to fetch tasks by deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineWindow {
    start: EpochMillis,
    end: EpochMillis,
}

impl DeadlineWindow {
    /// Creates a validated window.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidDeadlineWindow`] when `start` is
    /// after `end`.
    pub const fn new(start: EpochMillis, end: EpochMillis) -> Result<Self, TaskDomainError> {
        if start.value() > end.value() {
            return Err(TaskDomainError::InvalidDeadlineWindow {
                start: start.value(),
                end: end.value(),
            });
        }
        Ok(Self { start, end })
    }

    /// Returns the inclusive lower bound.
    #[must_use]
    pub const fn start(&self) -> EpochMillis {
        self.start
    }

    /// Returns the inclusive upper bound.
    #[must_use]
    pub const fn end(&self) -> EpochMillis {
        self.end
    }

    /// Returns `true` when `instant` lies inside the window.
    #[must_use]
    pub const fn contains(&self, instant: EpochMillis) -> bool {
        instant.value() >= self.start.value() && instant.value() <= self.end.value()
    }

    /// Decides whether a task with the given status and deadline belongs in a
    /// dashboard view over this window.
    ///
    /// Cancelled tasks never match. Any other task matches when its deadline
    /// is inside the window; an assigned task also matches when its deadline
    /// has already passed before the window opens, so overdue open work stays
    /// visible. Tasks without a deadline never match.
    #[must_use]
    pub const fn admits(&self, status: TaskStatus, deadline: Option<EpochMillis>) -> bool {
        let Some(due) = deadline else {
            return false;
        };
        if matches!(status, TaskStatus::Cancelled) {
            return false;
        }
        let overdue_and_open =
            due.value() < self.start.value() && matches!(status, TaskStatus::Assigned);
        self.contains(due) || overdue_and_open
    }
}

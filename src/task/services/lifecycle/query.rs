//! Read-only task queries.

use super::{TaskLifecycleResult, TaskLifecycleService};
use crate::task::{
    domain::{DeadlineWindow, EpochMillis, Priority, Task, UserId},
    ports::{ActorProvider, TaskRepository},
};
use mockable::Clock;
use tracing::{debug, instrument};

/// Request payload for the deadline-window view of a set of assignees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchByDateRequest {
    assignee_ids: Vec<u64>,
    start_date: i64,
    end_date: i64,
}

impl FetchByDateRequest {
    /// Creates a request for the inclusive window `[start_date, end_date]`,
    /// both in epoch milliseconds.
    #[must_use]
    pub fn new(assignee_ids: impl IntoIterator<Item = u64>, start_date: i64, end_date: i64) -> Self {
        Self {
            assignee_ids: assignee_ids.into_iter().collect(),
            start_date,
            end_date,
        }
    }
}

impl<R, C, A> TaskLifecycleService<R, C, A>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    A: ActorProvider,
{
    /// Returns the assignees' tasks that belong in the deadline window.
    ///
    /// Cancelled tasks never match. A task matches when its deadline falls
    /// inside the window, or when it is still assigned and its deadline has
    /// already passed the window start.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::Domain`] when the window ends
    /// before it starts or an assignee identifier is invalid.
    #[instrument(skip_all, fields(
        assignees = request.assignee_ids.len(),
        start = request.start_date,
        end = request.end_date,
    ))]
    pub async fn fetch_by_date(&self, request: FetchByDateRequest) -> TaskLifecycleResult<Vec<Task>> {
        let FetchByDateRequest {
            assignee_ids,
            start_date,
            end_date,
        } = request;
        let window = DeadlineWindow::new(EpochMillis::new(start_date), EpochMillis::new(end_date))?;
        let assignees = assignee_ids
            .into_iter()
            .map(UserId::new)
            .collect::<Result<Vec<_>, _>>()?;
        if assignees.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self.repository.find_by_assignees(&assignees).await?;
        let considered = candidates.len();
        let visible: Vec<Task> = candidates
            .into_iter()
            .filter(|task| task.is_visible_in(&window))
            .collect();
        debug!(considered, matched = visible.len(), "deadline window applied");
        Ok(visible)
    }

    /// Returns every task whose priority matches `label`.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::InvalidPriority`] when the label
    /// names no known priority.
    #[instrument(skip(self))]
    pub async fn find_by_priority(&self, label: &str) -> TaskLifecycleResult<Vec<Task>> {
        let priority = Priority::try_from(label)?;
        Ok(self.repository.find_by_priority(priority).await?)
    }
}

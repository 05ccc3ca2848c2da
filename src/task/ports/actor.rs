//! Port resolving which user an activity is attributed to.

use crate::task::domain::UserId;

/// Supplies the identity of the user performing the current operation.
#[cfg_attr(test, mockall::automock)]
pub trait ActorProvider: Send + Sync {
    /// Returns the acting user.
    fn current_actor(&self) -> UserId;
}

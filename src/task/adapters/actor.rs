//! Actor providers attributing activities to a user.
//!
//! [`StaticActor`] always answers with one configured identity and suits
//! batch jobs and tests. [`RequestContext`] carries the identity resolved by
//! the caller's authentication layer for a single request, falling back to a
//! system actor when the request is anonymous.

use crate::task::{domain::UserId, ports::ActorProvider};
use uuid::Uuid;

/// Actor provider returning a fixed user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticActor(UserId);

impl StaticActor {
    /// Creates a provider that always reports `actor`.
    #[must_use]
    pub const fn new(actor: UserId) -> Self {
        Self(actor)
    }
}

impl ActorProvider for StaticActor {
    fn current_actor(&self) -> UserId {
        self.0
    }
}

/// Request-scoped identity and tracing context.
///
/// # Example
///
/// ```
/// use workforce::task::adapters::actor::RequestContext;
/// use workforce::task::domain::UserId;
/// use workforce::task::ports::ActorProvider;
/// use uuid::Uuid;
///
/// let system = UserId::new(1).expect("valid system actor");
/// let user = UserId::new(42).expect("valid user");
/// let context = RequestContext::anonymous(system)
///     .with_correlation_id(Uuid::new_v4())
///     .with_user_id(user);
///
/// assert_eq!(context.current_actor(), user);
/// assert!(context.correlation_id.is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestContext {
    /// Correlation ID linking all operations of one caller request.
    pub correlation_id: Option<Uuid>,

    /// Authenticated user performing the request.
    pub user_id: Option<UserId>,

    /// Identity used when no user is authenticated.
    pub system_actor: UserId,
}

impl RequestContext {
    /// Creates a context with no authenticated user.
    #[must_use]
    pub const fn anonymous(system_actor: UserId) -> Self {
        Self {
            correlation_id: None,
            user_id: None,
            system_actor,
        }
    }

    /// Sets the correlation ID for distributed tracing.
    #[must_use]
    pub const fn with_correlation_id(mut self, id: Uuid) -> Self {
        self.correlation_id = Some(id);
        self
    }

    /// Sets the authenticated user.
    #[must_use]
    pub const fn with_user_id(mut self, id: UserId) -> Self {
        self.user_id = Some(id);
        self
    }

    /// Returns `true` if no user is authenticated.
    #[must_use]
    pub const fn is_anonymous(&self) -> bool {
        self.user_id.is_none()
    }
}

impl ActorProvider for RequestContext {
    fn current_actor(&self) -> UserId {
        self.user_id.unwrap_or(self.system_actor)
    }
}

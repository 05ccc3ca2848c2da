//! Application services for task lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    AddCommentRequest, AuditMode, CreateTaskRequest, ErrorClass, FetchByDateRequest,
    ReassignByReferenceRequest, ReassignmentOutcome, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService, UpdateTaskRequest,
};

//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Task records keyed by internal identifier.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// External business object identifier.
        reference_id -> Int8,
        /// External business object type.
        #[max_length = 50]
        reference_type -> Varchar,
        /// Catalog task kind.
        #[max_length = 100]
        kind -> Varchar,
        /// Task lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Current owner.
        assignee_id -> Int8,
        /// Task priority label.
        #[max_length = 20]
        priority -> Varchar,
        /// Deadline in epoch milliseconds.
        deadline_ms -> Nullable<Int8>,
        /// Free-text description.
        description -> Text,
        /// Optimistic-concurrency version.
        version -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only activity log.
    task_activities (id) {
        /// Activity identifier.
        id -> Uuid,
        /// Owning task.
        task_id -> Uuid,
        /// Insertion order, used to break timestamp ties.
        sequence -> Int8,
        /// Activity type label.
        #[max_length = 50]
        activity_type -> Varchar,
        /// Human-readable summary.
        description -> Text,
        /// User the change is attributed to.
        actor_id -> Int8,
        /// When the change happened.
        occurred_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only comment log.
    task_comments (id) {
        /// Comment identifier.
        id -> Uuid,
        /// Owning task.
        task_id -> Uuid,
        /// Insertion order, used to break timestamp ties.
        sequence -> Int8,
        /// Comment text.
        body -> Text,
        /// Comment author.
        author_id -> Int8,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::joinable!(task_activities -> tasks (task_id));
diesel::joinable!(task_comments -> tasks (task_id));
diesel::allow_tables_to_appear_in_same_query!(tasks, task_activities, task_comments);

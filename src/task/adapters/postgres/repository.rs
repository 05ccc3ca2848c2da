//! `PostgreSQL` repository implementation for task lifecycle storage.

use super::{
    models::{
        ActivityRow, CommentRow, NewActivityRow, NewCommentRow, NewTaskRow, TaskChangesRow,
        TaskRow,
    },
    schema::{task_activities, task_comments, tasks},
};
use crate::task::{
    domain::{
        Activity, ActivityId, ActivityType, Comment, CommentId, EpochMillis, PersistedActivityData,
        PersistedCommentData, PersistedTaskData, Priority, ReferenceId, ReferenceType, Task,
        TaskId, TaskKind, TaskReference, TaskStatus, UserId,
    },
    ports::{TaskChangeSet, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds a connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when the pool cannot open its
/// initial connections.
pub fn connect(database_url: &str, max_connections: u32) -> TaskRepositoryResult<TaskPgPool> {
    Pool::builder()
        .max_size(max_connections)
        .build(ConnectionManager::<PgConnection>::new(database_url))
        .map_err(TaskRepositoryError::persistence)
}

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }

    async fn load_tasks<F>(&self, query: F) -> TaskRepositoryResult<Vec<Task>>
    where
        F: FnOnce(&mut PgConnection) -> QueryResult<Vec<TaskRow>> + Send + 'static,
    {
        self.run_blocking(move |connection| {
            let rows = query(connection).map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn commit(&self, changes: TaskChangeSet) -> TaskRepositoryResult<()> {
        if changes.is_empty() {
            return Ok(());
        }
        let (inserted, updated, activities, comments) = changes.into_parts();
        let new_tasks = inserted
            .iter()
            .map(|task| Ok((task.id(), to_new_row(task)?)))
            .collect::<TaskRepositoryResult<Vec<_>>>()?;
        let task_updates = updated
            .iter()
            .map(|task| Ok((task.id(), task.version(), to_changes_row(task)?)))
            .collect::<TaskRepositoryResult<Vec<_>>>()?;
        let new_activities = activities
            .iter()
            .map(to_activity_row)
            .collect::<TaskRepositoryResult<Vec<_>>>()?;
        let new_comments = comments
            .iter()
            .map(to_comment_row)
            .collect::<TaskRepositoryResult<Vec<_>>>()?;

        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx| {
                for (task_id, row) in &new_tasks {
                    insert_task(tx, *task_id, row)?;
                }
                for (task_id, version, row) in &task_updates {
                    update_task(tx, *task_id, *version, row)?;
                }
                for row in &new_activities {
                    diesel::insert_into(task_activities::table)
                        .values(row)
                        .execute(tx)
                        .map_err(|err| map_history_error(err, row.task_id))?;
                }
                for row in &new_comments {
                    diesel::insert_into(task_comments::table)
                        .values(row)
                        .execute(tx)
                        .map_err(|err| map_history_error(err, row.task_id))?;
                }
                Ok(())
            })
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .filter(tasks::id.eq(id.into_inner()))
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_reference(
        &self,
        reference: &TaskReference,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let reference_id = to_db_int(reference.reference_id().value())?;
        let reference_type = reference.reference_type().as_str();
        self.load_tasks(move |connection| {
            tasks::table
                .filter(tasks::reference_id.eq(reference_id))
                .filter(tasks::reference_type.eq(reference_type))
                .order(tasks::created_at.asc())
                .select(TaskRow::as_select())
                .load(connection)
        })
        .await
    }

    async fn find_by_assignees(&self, assignees: &[UserId]) -> TaskRepositoryResult<Vec<Task>> {
        if assignees.is_empty() {
            return Ok(Vec::new());
        }
        let assignee_ids = assignees
            .iter()
            .map(|assignee| to_db_int(assignee.value()))
            .collect::<TaskRepositoryResult<Vec<_>>>()?;
        self.load_tasks(move |connection| {
            tasks::table
                .filter(tasks::assignee_id.eq_any(assignee_ids))
                .select(TaskRow::as_select())
                .load(connection)
        })
        .await
    }

    async fn find_by_priority(&self, priority: Priority) -> TaskRepositoryResult<Vec<Task>> {
        let label = priority.as_str();
        self.load_tasks(move |connection| {
            tasks::table
                .filter(tasks::priority.eq(label))
                .select(TaskRow::as_select())
                .load(connection)
        })
        .await
    }

    async fn activities_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<Activity>> {
        self.run_blocking(move |connection| {
            let rows = task_activities::table
                .filter(task_activities::task_id.eq(task_id.into_inner()))
                .order((
                    task_activities::occurred_at.asc(),
                    task_activities::sequence.asc(),
                ))
                .select(ActivityRow::as_select())
                .load::<ActivityRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_activity).collect()
        })
        .await
    }

    async fn comments_for(&self, task_id: TaskId) -> TaskRepositoryResult<Vec<Comment>> {
        self.run_blocking(move |connection| {
            let rows = task_comments::table
                .filter(task_comments::task_id.eq(task_id.into_inner()))
                .order((task_comments::created_at.asc(), task_comments::sequence.asc()))
                .select(CommentRow::as_select())
                .load::<CommentRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_comment).collect()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            // Activities and comments go with the task via ON DELETE CASCADE.
            let deleted = diesel::delete(tasks::table.filter(tasks::id.eq(id.into_inner())))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }
}

fn insert_task(
    connection: &mut PgConnection,
    task_id: TaskId,
    row: &NewTaskRow,
) -> TaskRepositoryResult<()> {
    diesel::insert_into(tasks::table)
        .values(row)
        .execute(connection)
        .map_err(|err| match err {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                TaskRepositoryError::DuplicateTask(task_id)
            }
            _ => TaskRepositoryError::persistence(err),
        })?;
    Ok(())
}

/// Writes a task update guarded by the version it was read at.
fn update_task(
    connection: &mut PgConnection,
    task_id: TaskId,
    read_version: u64,
    row: &TaskChangesRow,
) -> TaskRepositoryResult<()> {
    let expected = to_db_int(read_version)?;
    let updated = diesel::update(
        tasks::table
            .filter(tasks::id.eq(task_id.into_inner()))
            .filter(tasks::version.eq(expected)),
    )
    .set(row)
    .execute(connection)?;

    if updated > 0 {
        return Ok(());
    }

    let stored_version = tasks::table
        .filter(tasks::id.eq(task_id.into_inner()))
        .select(tasks::version)
        .first::<i64>(connection)
        .optional()?;
    match stored_version {
        None => Err(TaskRepositoryError::NotFound(task_id)),
        Some(actual) => Err(TaskRepositoryError::VersionConflict {
            task_id,
            expected: read_version,
            actual: from_db_int(actual)?,
        }),
    }
}

fn map_history_error(err: DieselError, task_id: uuid::Uuid) -> TaskRepositoryError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            TaskRepositoryError::MissingTask(TaskId::from_uuid(task_id))
        }
        _ => TaskRepositoryError::persistence(err),
    }
}

fn to_db_int(value: u64) -> TaskRepositoryResult<i64> {
    i64::try_from(value).map_err(TaskRepositoryError::persistence)
}

fn from_db_int(value: i64) -> TaskRepositoryResult<u64> {
    u64::try_from(value).map_err(TaskRepositoryError::persistence)
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    Ok(NewTaskRow {
        id: task.id().into_inner(),
        reference_id: to_db_int(task.reference().reference_id().value())?,
        reference_type: task.reference().reference_type().as_str().to_owned(),
        kind: task.kind().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        assignee_id: to_db_int(task.assignee_id().value())?,
        priority: task.priority().as_str().to_owned(),
        deadline_ms: task.deadline().map(EpochMillis::value),
        description: task.description().to_owned(),
        version: to_db_int(task.version())?,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn to_changes_row(task: &Task) -> TaskRepositoryResult<TaskChangesRow> {
    Ok(TaskChangesRow {
        status: task.status().as_str().to_owned(),
        assignee_id: to_db_int(task.assignee_id().value())?,
        priority: task.priority().as_str().to_owned(),
        deadline_ms: task.deadline().map(EpochMillis::value),
        description: task.description().to_owned(),
        version: to_db_int(task.version().saturating_add(1))?,
        updated_at: task.updated_at(),
    })
}

fn to_activity_row(activity: &Activity) -> TaskRepositoryResult<NewActivityRow> {
    Ok(NewActivityRow {
        id: activity.id().into_inner(),
        task_id: activity.task_id().into_inner(),
        activity_type: activity.activity_type().as_str().to_owned(),
        description: activity.description().to_owned(),
        actor_id: to_db_int(activity.actor_id().value())?,
        occurred_at: activity.occurred_at(),
    })
}

fn to_comment_row(comment: &Comment) -> TaskRepositoryResult<NewCommentRow> {
    Ok(NewCommentRow {
        id: comment.id().into_inner(),
        task_id: comment.task_id().into_inner(),
        body: comment.body().to_owned(),
        author_id: to_db_int(comment.author_id().value())?,
        created_at: comment.created_at(),
    })
}

fn to_user_id(value: i64) -> TaskRepositoryResult<UserId> {
    UserId::new(from_db_int(value)?).map_err(TaskRepositoryError::persistence)
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        reference_id,
        reference_type,
        kind,
        status,
        assignee_id,
        priority,
        deadline_ms,
        description,
        version,
        created_at,
        updated_at,
    } = row;

    let reference = TaskReference::new(
        ReferenceId::new(from_db_int(reference_id)?).map_err(TaskRepositoryError::persistence)?,
        ReferenceType::try_from(reference_type.as_str())
            .map_err(TaskRepositoryError::persistence)?,
    );

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        reference,
        kind: TaskKind::try_from(kind.as_str()).map_err(TaskRepositoryError::persistence)?,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        assignee_id: to_user_id(assignee_id)?,
        priority: Priority::try_from(priority.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        deadline: deadline_ms.map(EpochMillis::new),
        description,
        version: from_db_int(version)?,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn row_to_activity(row: ActivityRow) -> TaskRepositoryResult<Activity> {
    Ok(Activity::from_persisted(PersistedActivityData {
        id: ActivityId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        activity_type: ActivityType::try_from(row.activity_type.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        description: row.description,
        actor_id: to_user_id(row.actor_id)?,
        occurred_at: row.occurred_at,
    }))
}

fn row_to_comment(row: CommentRow) -> TaskRepositoryResult<Comment> {
    Ok(Comment::from_persisted(PersistedCommentData {
        id: CommentId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        body: row.body,
        author_id: to_user_id(row.author_id)?,
        created_at: row.created_at,
    }))
}

//! Postgres-backed course gateway.
//!
//! Expected tables:
//!
//! | Table | Columns |
//! |---|---|
//! | `courses` | `id uuid`, `title text`, `instructor_id uuid` |
//! | `modules` | `id uuid`, `course_id uuid`, `title text`, `position int` |
//! | `lessons` | `id uuid`, `module_id uuid`, `title text`, `position int` |
//! | `enrollments` | `id uuid`, `user_id uuid`, `course_id uuid`, `enrolled_at timestamptz` |
//! | `lesson_progress` | `user_id uuid`, `lesson_id uuid`, `status text`, `updated_at timestamptz` |
//!
//! `lesson_progress.status` holds `NOT_STARTED`, `IN_PROGRESS` or `COMPLETED`.
//!
//! ## Error Mapping
//!
//! | SQLx Error | GatewayError |
//! |------------|--------------|
//! | PoolClosed / PoolTimedOut / Io / Tls | `Connection` |
//! | ColumnDecode / Decode / ColumnNotFound / TypeNotFound | `Decode` |
//! | Database and anything else | `Query` |

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use learnhub_core::{
    Course, CourseId, Enrollment, EnrollmentId, EnrollmentWithCourse, LessonId, ProgressStatus,
    UserId,
};
use learnhub_progress::{CourseGateway, GatewayError};

use super::tree::{CourseTreeRow, assemble};

const COURSE_TREE_COLUMNS: &str = r#"
    c.id AS course_id,
    c.title AS course_title,
    c.instructor_id,
    m.id AS module_id,
    m.title AS module_title,
    m.position AS module_position,
    l.id AS lesson_id,
    l.title AS lesson_title,
    l.position AS lesson_position
"#;

const COURSE_TREE_JOINS: &str = r#"
    LEFT JOIN modules m ON m.course_id = c.id
    LEFT JOIN lessons l ON l.module_id = m.id
"#;

const COURSE_TREE_ORDER: &str = "ORDER BY c.title, c.id, m.position, m.id, l.position, l.id";

#[derive(Debug, FromRow)]
struct EnrollmentTreeRow {
    enrollment_id: Uuid,
    user_id: Uuid,
    enrolled_at: DateTime<Utc>,
    #[sqlx(flatten)]
    tree: CourseTreeRow,
}

#[derive(Debug, FromRow)]
struct EnrollmentRow {
    id: Uuid,
    user_id: Uuid,
    course_id: Uuid,
    enrolled_at: DateTime<Utc>,
}

impl From<EnrollmentRow> for Enrollment {
    fn from(row: EnrollmentRow) -> Self {
        Enrollment {
            id: EnrollmentId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            course_id: CourseId::from_uuid(row.course_id),
            enrolled_at: row.enrolled_at,
        }
    }
}

/// Postgres-backed, read-only course gateway.
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Debug, Clone)]
pub struct PostgresCourseGateway {
    pool: Arc<PgPool>,
}

impl PostgresCourseGateway {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Open a pool against `database_url`.
    ///
    /// Connections are established lazily, so this does not touch the network.
    pub fn connect_lazy(database_url: &str, max_connections: u32) -> Result<Self, GatewayError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy(database_url)
            .map_err(|e| map_sqlx_error("connect", e))?;
        Ok(Self::new(pool))
    }

    async fn load_courses(&self, instructor_id: Option<UserId>) -> Result<Vec<Course>, GatewayError> {
        let sql = format!(
            "SELECT {COURSE_TREE_COLUMNS} FROM courses c {COURSE_TREE_JOINS} \
             WHERE ($1::uuid IS NULL OR c.instructor_id = $1) {COURSE_TREE_ORDER}"
        );

        let rows: Vec<CourseTreeRow> = sqlx::query_as(&sql)
            .bind(instructor_id.map(|id| *id.as_uuid()))
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("load_courses", e))?;

        assemble(rows)
    }
}

#[async_trait]
impl CourseGateway for PostgresCourseGateway {
    #[instrument(skip(self), fields(enrollment_id = %id), err)]
    async fn find_enrollment_with_lessons(
        &self,
        id: EnrollmentId,
    ) -> Result<Option<EnrollmentWithCourse>, GatewayError> {
        let sql = format!(
            "SELECT e.id AS enrollment_id, e.user_id, e.enrolled_at, {COURSE_TREE_COLUMNS} \
             FROM enrollments e JOIN courses c ON c.id = e.course_id {COURSE_TREE_JOINS} \
             WHERE e.id = $1 {COURSE_TREE_ORDER}"
        );

        let rows: Vec<EnrollmentTreeRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_enrollment_with_lessons", e))?;

        let Some(first) = rows.first() else {
            return Ok(None);
        };
        let enrollment = Enrollment {
            id: EnrollmentId::from_uuid(first.enrollment_id),
            user_id: UserId::from_uuid(first.user_id),
            course_id: CourseId::from_uuid(first.tree.course_id),
            enrolled_at: first.enrolled_at,
        };

        let course = assemble(rows.into_iter().map(|r| r.tree))?
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Decode("enrollment row without course".to_string()))?;

        Ok(Some(EnrollmentWithCourse { enrollment, course }))
    }

    #[instrument(skip(self, lesson_ids), fields(user_id = %user_id, lessons = lesson_ids.len()), err)]
    async fn count_completed_lesson_progress(
        &self,
        user_id: UserId,
        lesson_ids: &[LessonId],
    ) -> Result<u64, GatewayError> {
        let ids: Vec<Uuid> = lesson_ids.iter().map(|id| *id.as_uuid()).collect();

        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS completed
            FROM lesson_progress
            WHERE user_id = $1
                AND status = $2
                AND lesson_id = ANY($3)
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(ProgressStatus::Completed.as_str())
        .bind(ids)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("count_completed_lesson_progress", e))?;

        let completed: i64 = row
            .try_get("completed")
            .map_err(|e| map_sqlx_error("count_completed_lesson_progress", e))?;

        u64::try_from(completed).map_err(|_| GatewayError::Decode(format!("negative count {completed}")))
    }

    #[instrument(skip(self), fields(user_id = %user_id), err)]
    async fn list_enrollments_for_user(&self, user_id: UserId) -> Result<Vec<Enrollment>, GatewayError> {
        let rows: Vec<EnrollmentRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, course_id, enrolled_at
            FROM enrollments
            WHERE user_id = $1
            ORDER BY enrolled_at ASC
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_enrollments_for_user", e))?;

        Ok(rows.into_iter().map(Enrollment::from).collect())
    }

    #[instrument(skip(self), fields(instructor_id = %instructor_id), err)]
    async fn list_courses_for_instructor(&self, instructor_id: UserId) -> Result<Vec<Course>, GatewayError> {
        self.load_courses(Some(instructor_id)).await
    }

    #[instrument(skip(self), err)]
    async fn list_courses(&self) -> Result<Vec<Course>, GatewayError> {
        self.load_courses(None).await
    }

    #[instrument(skip(self), fields(course_id = %course_id), err)]
    async fn count_enrollments_for_course(&self, course_id: CourseId) -> Result<u64, GatewayError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM enrollments WHERE course_id = $1")
            .bind(course_id.as_uuid())
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("count_enrollments_for_course", e))?;

        u64::try_from(total).map_err(|_| GatewayError::Decode(format!("negative count {total}")))
    }
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> GatewayError {
    match err {
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => {
            GatewayError::Connection(format!("connection pool unavailable in {operation}"))
        }
        sqlx::Error::Io(e) => GatewayError::Connection(format!("io error in {operation}: {e}")),
        sqlx::Error::Tls(e) => GatewayError::Connection(format!("tls error in {operation}: {e}")),
        sqlx::Error::Configuration(e) => {
            GatewayError::Connection(format!("invalid configuration in {operation}: {e}"))
        }
        sqlx::Error::ColumnDecode { index, source } => {
            GatewayError::Decode(format!("column {index} in {operation}: {source}"))
        }
        sqlx::Error::Decode(e) => GatewayError::Decode(format!("{operation}: {e}")),
        sqlx::Error::ColumnNotFound(name) => {
            GatewayError::Decode(format!("column '{name}' missing in {operation}"))
        }
        sqlx::Error::TypeNotFound { type_name } => {
            GatewayError::Decode(format!("type '{type_name}' missing in {operation}"))
        }
        sqlx::Error::Database(db_err) => {
            GatewayError::Query(format!("database error in {operation}: {}", db_err.message()))
        }
        other => GatewayError::Query(format!("{operation}: {other}")),
    }
}

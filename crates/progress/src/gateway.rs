use async_trait::async_trait;
use thiserror::Error;

use learnhub_core::{Course, CourseId, Enrollment, EnrollmentId, EnrollmentWithCourse, LessonId, UserId};

/// Storage failure surfaced by a gateway implementation.
///
/// Callers never translate these; they propagate to the HTTP boundary as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("failed to decode row: {0}")]
    Decode(String),
}

/// Read-only access to courses, enrollments and lesson progress.
///
/// Passed explicitly into the components that need it (usually as
/// `Arc<dyn CourseGateway>`), so tests can substitute their own.
#[async_trait]
pub trait CourseGateway: Send + Sync {
    /// Enrollment joined with its course, modules and lessons, in one read.
    async fn find_enrollment_with_lessons(
        &self,
        id: EnrollmentId,
    ) -> Result<Option<EnrollmentWithCourse>, GatewayError>;

    /// Number of `COMPLETED` progress rows for `user_id` among `lesson_ids`.
    ///
    /// Rows are counted as stored: duplicates inflate the count.
    async fn count_completed_lesson_progress(
        &self,
        user_id: UserId,
        lesson_ids: &[LessonId],
    ) -> Result<u64, GatewayError>;

    async fn list_enrollments_for_user(&self, user_id: UserId) -> Result<Vec<Enrollment>, GatewayError>;

    async fn list_courses_for_instructor(&self, instructor_id: UserId) -> Result<Vec<Course>, GatewayError>;

    async fn list_courses(&self) -> Result<Vec<Course>, GatewayError>;

    async fn count_enrollments_for_course(&self, course_id: CourseId) -> Result<u64, GatewayError>;
}

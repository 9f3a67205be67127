//! Enrollments and per-lesson progress records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::course::Course;
use crate::entity::Entity;
use crate::id::{CourseId, EnrollmentId, LessonId, UserId};

/// Links exactly one user to exactly one course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub user_id: UserId,
    pub course_id: CourseId,
    pub enrolled_at: DateTime<Utc>,
}

impl Entity for Enrollment {
    type Id = EnrollmentId;

    fn id(&self) -> EnrollmentId {
        self.id
    }
}

/// An enrollment joined with its course tree (modules + lessons), as
/// returned by a single gateway read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentWithCourse {
    pub enrollment: Enrollment,
    pub course: Course,
}

/// Completion state of one lesson for one user.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::NotStarted => "NOT_STARTED",
            ProgressStatus::InProgress => "IN_PROGRESS",
            ProgressStatus::Completed => "COMPLETED",
        }
    }
}

impl core::fmt::Display for ProgressStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress record keyed by (user, lesson).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LessonProgress {
    pub user_id: UserId,
    pub lesson_id: LessonId,
    pub status: ProgressStatus,
    pub updated_at: DateTime<Utc>,
}

impl LessonProgress {
    pub fn is_completed(&self) -> bool {
        self.status == ProgressStatus::Completed
    }
}

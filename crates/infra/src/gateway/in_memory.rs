use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use learnhub_core::{
    Course, CourseId, Enrollment, EnrollmentId, EnrollmentWithCourse, Entity, LessonId,
    LessonProgress, UserId,
};
use learnhub_progress::{CourseGateway, GatewayError};

#[derive(Debug, Default)]
struct Tables {
    courses: HashMap<CourseId, Course>,
    enrollments: HashMap<EnrollmentId, Enrollment>,
    progress: Vec<LessonProgress>,
}

/// In-memory course gateway.
///
/// Intended for tests/dev. Progress rows are append-only, so duplicate
/// completions for the same lesson are kept just like a table without a
/// uniqueness constraint would keep them.
#[derive(Debug, Default)]
pub struct InMemoryCourseGateway {
    tables: RwLock<Tables>,
}

impl InMemoryCourseGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_course(&self, course: Course) -> Result<(), GatewayError> {
        let mut tables = self.write()?;
        tables.courses.insert(course.id(), course);
        Ok(())
    }

    pub fn insert_enrollment(&self, enrollment: Enrollment) -> Result<(), GatewayError> {
        let mut tables = self.write()?;
        if !tables.courses.contains_key(&enrollment.course_id) {
            return Err(GatewayError::Query(format!(
                "enrollment {} references unknown course {}",
                enrollment.id, enrollment.course_id
            )));
        }
        tables.enrollments.insert(enrollment.id(), enrollment);
        Ok(())
    }

    pub fn record_progress(&self, progress: LessonProgress) -> Result<(), GatewayError> {
        self.write()?.progress.push(progress);
        Ok(())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, GatewayError> {
        self.tables
            .read()
            .map_err(|_| GatewayError::Connection("lock poisoned".to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Tables>, GatewayError> {
        self.tables
            .write()
            .map_err(|_| GatewayError::Connection("lock poisoned".to_string()))
    }
}

#[async_trait]
impl CourseGateway for InMemoryCourseGateway {
    async fn find_enrollment_with_lessons(
        &self,
        id: EnrollmentId,
    ) -> Result<Option<EnrollmentWithCourse>, GatewayError> {
        let tables = self.read()?;

        let Some(enrollment) = tables.enrollments.get(&id) else {
            return Ok(None);
        };
        let course = tables
            .courses
            .get(&enrollment.course_id)
            .cloned()
            .ok_or_else(|| GatewayError::Query(format!("course {} missing", enrollment.course_id)))?;

        Ok(Some(EnrollmentWithCourse {
            enrollment: enrollment.clone(),
            course,
        }))
    }

    async fn count_completed_lesson_progress(
        &self,
        user_id: UserId,
        lesson_ids: &[LessonId],
    ) -> Result<u64, GatewayError> {
        let tables = self.read()?;

        Ok(tables
            .progress
            .iter()
            .filter(|p| p.user_id == user_id && p.is_completed() && lesson_ids.contains(&p.lesson_id))
            .count() as u64)
    }

    async fn list_enrollments_for_user(&self, user_id: UserId) -> Result<Vec<Enrollment>, GatewayError> {
        let tables = self.read()?;

        let mut enrollments: Vec<Enrollment> = tables
            .enrollments
            .values()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        enrollments.sort_by_key(|e| e.enrolled_at);
        Ok(enrollments)
    }

    async fn list_courses_for_instructor(&self, instructor_id: UserId) -> Result<Vec<Course>, GatewayError> {
        let tables = self.read()?;

        Ok(tables
            .courses
            .values()
            .filter(|c| c.instructor_id == instructor_id)
            .cloned()
            .collect())
    }

    async fn list_courses(&self) -> Result<Vec<Course>, GatewayError> {
        Ok(self.read()?.courses.values().cloned().collect())
    }

    async fn count_enrollments_for_course(&self, course_id: CourseId) -> Result<u64, GatewayError> {
        let tables = self.read()?;
        Ok(tables
            .enrollments
            .values()
            .filter(|e| e.course_id == course_id)
            .count() as u64)
    }
}

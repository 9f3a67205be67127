//! In-crate gateway double for unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use learnhub_core::{
    Course, CourseId, Enrollment, EnrollmentId, EnrollmentWithCourse, Lesson, LessonId,
    LessonProgress, Module, ModuleId, ProgressStatus, UserId,
};

use crate::gateway::{CourseGateway, GatewayError};

#[derive(Default)]
pub struct StubGateway {
    courses: Vec<Course>,
    enrollments: Vec<Enrollment>,
    progress: Vec<LessonProgress>,
    failure: Option<String>,
    find_calls: AtomicUsize,
    count_calls: AtomicUsize,
}

impl StubGateway {
    pub fn failing(msg: &str) -> Self {
        Self {
            failure: Some(msg.to_string()),
            ..Self::default()
        }
    }

    pub fn add_course(&mut self, course: Course) {
        self.courses.push(course);
    }

    pub fn record(&mut self, user_id: UserId, lesson_id: LessonId, status: ProgressStatus) {
        self.progress.push(LessonProgress {
            user_id,
            lesson_id,
            status,
            updated_at: Utc::now(),
        });
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    pub fn count_calls(&self) -> usize {
        self.count_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), GatewayError> {
        match &self.failure {
            Some(msg) => Err(GatewayError::Connection(msg.clone())),
            None => Ok(()),
        }
    }
}

/// Course with one module per entry, each holding that many lessons.
pub fn course_with_lessons(lessons_per_module: &[usize]) -> Course {
    course_for(UserId::new(), lessons_per_module)
}

pub fn course_for(instructor_id: UserId, lessons_per_module: &[usize]) -> Course {
    let modules = lessons_per_module
        .iter()
        .enumerate()
        .map(|(m, count)| Module {
            id: ModuleId::new(),
            title: format!("Module {m}"),
            position: m as u32,
            lessons: (0..*count)
                .map(|l| Lesson {
                    id: LessonId::new(),
                    title: format!("Lesson {m}.{l}"),
                    position: l as u32,
                })
                .collect(),
        })
        .collect();

    Course {
        id: CourseId::new(),
        title: "Test course".to_string(),
        instructor_id,
        modules,
    }
}

pub fn enroll(gateway: &mut StubGateway, user_id: UserId, course: Course) -> EnrollmentId {
    let id = EnrollmentId::new();
    gateway.enrollments.push(Enrollment {
        id,
        user_id,
        course_id: course.id,
        enrolled_at: Utc::now(),
    });
    if !gateway.courses.iter().any(|c| c.id == course.id) {
        gateway.courses.push(course);
    }
    id
}

#[async_trait]
impl CourseGateway for StubGateway {
    async fn find_enrollment_with_lessons(
        &self,
        id: EnrollmentId,
    ) -> Result<Option<EnrollmentWithCourse>, GatewayError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        let Some(enrollment) = self.enrollments.iter().find(|e| e.id == id) else {
            return Ok(None);
        };
        let course = self
            .courses
            .iter()
            .find(|c| c.id == enrollment.course_id)
            .cloned()
            .ok_or_else(|| GatewayError::Query("dangling enrollment".to_string()))?;

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
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;

        Ok(self
            .progress
            .iter()
            .filter(|p| p.user_id == user_id && p.is_completed() && lesson_ids.contains(&p.lesson_id))
            .count() as u64)
    }

    async fn list_enrollments_for_user(&self, user_id: UserId) -> Result<Vec<Enrollment>, GatewayError> {
        self.check()?;
        Ok(self
            .enrollments
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_courses_for_instructor(&self, instructor_id: UserId) -> Result<Vec<Course>, GatewayError> {
        self.check()?;
        Ok(self
            .courses
            .iter()
            .filter(|c| c.instructor_id == instructor_id)
            .cloned()
            .collect())
    }

    async fn list_courses(&self) -> Result<Vec<Course>, GatewayError> {
        self.check()?;
        Ok(self.courses.clone())
    }

    async fn count_enrollments_for_course(&self, course_id: CourseId) -> Result<u64, GatewayError> {
        self.check()?;
        Ok(self.enrollments.iter().filter(|e| e.course_id == course_id).count() as u64)
    }
}

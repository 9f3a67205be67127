//! View models for the role dashboards.

use std::sync::Arc;

use serde::Serialize;
use tracing::instrument;

use learnhub_core::{Course, CourseId, UserId};

use crate::aggregator::{EnrollmentProgress, ProgressAggregator, ProgressError};
use crate::gateway::{CourseGateway, GatewayError};

/// Course row for instructor, mentor and admin dashboards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseSummary {
    pub course_id: CourseId,
    pub title: String,
    pub instructor_id: UserId,
    pub module_count: usize,
    pub lesson_count: usize,
    pub enrollment_count: u64,
}

#[derive(Clone)]
pub struct DashboardService {
    gateway: Arc<dyn CourseGateway>,
    aggregator: ProgressAggregator,
}

impl DashboardService {
    pub fn new(gateway: Arc<dyn CourseGateway>) -> Self {
        Self {
            aggregator: ProgressAggregator::new(gateway.clone()),
            gateway,
        }
    }

    pub fn aggregator(&self) -> &ProgressAggregator {
        &self.aggregator
    }

    /// Every enrollment of `user_id` with its completion, ordered by course title.
    ///
    /// An enrollment removed between listing and reading is skipped.
    #[instrument(skip(self), fields(user_id = %user_id), err)]
    pub async fn student_dashboard(&self, user_id: UserId) -> Result<Vec<EnrollmentProgress>, ProgressError> {
        let enrollments = self.gateway.list_enrollments_for_user(user_id).await?;

        let mut rows = Vec::with_capacity(enrollments.len());
        for enrollment in enrollments {
            match self.aggregator.enrollment_progress(enrollment.id).await {
                Ok(row) => rows.push(row),
                Err(ProgressError::NotFound(id)) => {
                    tracing::debug!(enrollment_id = %id, "enrollment vanished while building dashboard");
                }
                Err(e) => return Err(e),
            }
        }

        rows.sort_by(|a, b| a.course_title.cmp(&b.course_title));
        Ok(rows)
    }

    /// Courses taught by `instructor_id`.
    #[instrument(skip(self), fields(instructor_id = %instructor_id), err)]
    pub async fn instructor_dashboard(&self, instructor_id: UserId) -> Result<Vec<CourseSummary>, GatewayError> {
        let courses = self.gateway.list_courses_for_instructor(instructor_id).await?;
        self.summarize(courses).await
    }

    /// The whole catalog.
    #[instrument(skip(self), err)]
    pub async fn catalog(&self) -> Result<Vec<CourseSummary>, GatewayError> {
        let courses = self.gateway.list_courses().await?;
        self.summarize(courses).await
    }

    async fn summarize(&self, courses: Vec<Course>) -> Result<Vec<CourseSummary>, GatewayError> {
        let mut summaries = Vec::with_capacity(courses.len());
        for course in courses {
            let enrollment_count = self.gateway.count_enrollments_for_course(course.id).await?;
            summaries.push(CourseSummary {
                course_id: course.id,
                module_count: course.module_count(),
                lesson_count: course.lesson_count(),
                instructor_id: course.instructor_id,
                title: course.title,
                enrollment_count,
            });
        }

        summaries.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{StubGateway, course_for, course_with_lessons, enroll};
    use learnhub_core::ProgressStatus;

    fn titled(mut course: Course, title: &str) -> Course {
        course.title = title.to_string();
        course
    }

    #[tokio::test]
    async fn student_dashboard_lists_only_own_enrollments_with_progress() {
        let student = UserId::new();
        let classmate = UserId::new();

        let rust = titled(course_with_lessons(&[2]), "Rust");
        let go = titled(course_with_lessons(&[4]), "Go");
        let rust_lesson = rust.lesson_ids()[0];

        let mut gateway = StubGateway::default();
        enroll(&mut gateway, student, rust.clone());
        enroll(&mut gateway, student, go);
        enroll(&mut gateway, classmate, rust);
        gateway.record(student, rust_lesson, ProgressStatus::Completed);

        let service = DashboardService::new(Arc::new(gateway));
        let rows = service.student_dashboard(student).await.unwrap();

        let view: Vec<(&str, u8)> = rows
            .iter()
            .map(|r| (r.course_title.as_str(), r.percentage.value()))
            .collect();
        assert_eq!(view, vec![("Go", 0), ("Rust", 50)]);
    }

    #[tokio::test]
    async fn instructor_dashboard_counts_enrollments_per_course() {
        let instructor = UserId::new();
        let mine = titled(course_for(instructor, &[1, 2]), "Mine");
        let theirs = titled(course_with_lessons(&[1]), "Theirs");

        let mut gateway = StubGateway::default();
        enroll(&mut gateway, UserId::new(), mine.clone());
        enroll(&mut gateway, UserId::new(), mine.clone());
        gateway.add_course(theirs);

        let service = DashboardService::new(Arc::new(gateway));
        let summaries = service.instructor_dashboard(instructor).await.unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].course_id, mine.id);
        assert_eq!(summaries[0].module_count, 2);
        assert_eq!(summaries[0].lesson_count, 3);
        assert_eq!(summaries[0].enrollment_count, 2);
    }

    #[tokio::test]
    async fn catalog_is_sorted_by_title() {
        let mut gateway = StubGateway::default();
        gateway.add_course(titled(course_with_lessons(&[1]), "Zig"));
        gateway.add_course(titled(course_with_lessons(&[1]), "Ada"));

        let service = DashboardService::new(Arc::new(gateway));
        let titles: Vec<String> = service
            .catalog()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();

        assert_eq!(titles, vec!["Ada".to_string(), "Zig".to_string()]);
    }

    #[tokio::test]
    async fn student_dashboard_surfaces_gateway_failure() {
        let service = DashboardService::new(Arc::new(StubGateway::failing("timeout")));
        let err = service.student_dashboard(UserId::new()).await.unwrap_err();
        assert!(matches!(err, ProgressError::Upstream(GatewayError::Connection(_))));
    }
}

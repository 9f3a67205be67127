use serde::Serialize;

use learnhub_auth::Role;
use learnhub_core::{EnrollmentId, UserId};
use learnhub_progress::{CourseSummary, EnrollmentProgress, Percentage};

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct WhoAmIResponse {
    pub user_id: UserId,
    pub role: Option<Role>,
    pub landing: &'static str,
}

#[derive(Debug, Serialize)]
pub struct StudentDashboardResponse {
    pub enrollments: Vec<EnrollmentProgress>,
}

#[derive(Debug, Serialize)]
pub struct CourseListResponse {
    pub courses: Vec<CourseSummary>,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub enrollment_id: EnrollmentId,
    pub percentage: Percentage,
}

//! Completion percentage for a single enrollment.
//!
//! A pure derived view: every call re-reads storage, nothing is cached and
//! nothing is written.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tracing::instrument;

use learnhub_core::{CourseId, EnrollmentId, EnrollmentWithCourse, UserId};

use crate::gateway::{CourseGateway, GatewayError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProgressError {
    #[error("enrollment {0} not found")]
    NotFound(EnrollmentId),

    #[error(transparent)]
    Upstream(#[from] GatewayError),
}

/// Whole-number completion percentage, always within `0..=100`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    pub const ZERO: Percentage = Percentage(0);
    pub const FULL: Percentage = Percentage(100);

    /// `100 * completed / total`, rounded half up and clamped to 100.
    ///
    /// A zero total yields `ZERO`. `FULL` is reserved for `completed >= total`:
    /// an unfinished course never rounds up to 100.
    pub fn from_ratio(completed: u64, total: u64) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        if completed >= total {
            return Self::FULL;
        }
        let scaled = completed.saturating_mul(200).saturating_add(total) / total.saturating_mul(2);
        Self(scaled.min(99) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl core::fmt::Display for Percentage {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[derive(Clone)]
pub struct ProgressAggregator {
    gateway: Arc<dyn CourseGateway>,
}

impl ProgressAggregator {
    pub fn new(gateway: Arc<dyn CourseGateway>) -> Self {
        Self { gateway }
    }

    /// Completion percentage of the enrollment's owner across every lesson of
    /// the enrolled course.
    ///
    /// Fails with `NotFound` for an unknown enrollment. Gateway errors are
    /// returned unchanged.
    pub async fn compute_progress(&self, enrollment_id: EnrollmentId) -> Result<Percentage, ProgressError> {
        Ok(self.enrollment_progress(enrollment_id).await?.percentage)
    }

    /// Same single read as [`compute_progress`](Self::compute_progress), keeping
    /// the course details a dashboard row needs.
    #[instrument(skip(self), fields(enrollment_id = %enrollment_id), err)]
    pub async fn enrollment_progress(
        &self,
        enrollment_id: EnrollmentId,
    ) -> Result<EnrollmentProgress, ProgressError> {
        let joined = self
            .gateway
            .find_enrollment_with_lessons(enrollment_id)
            .await?
            .ok_or(ProgressError::NotFound(enrollment_id))?;

        let percentage = self.percentage_of(&joined).await?;
        let EnrollmentWithCourse { enrollment, course } = joined;
        let total_lessons = course.lesson_count();

        Ok(EnrollmentProgress {
            enrollment_id,
            user_id: enrollment.user_id,
            course_id: course.id,
            course_title: course.title,
            total_lessons,
            percentage,
        })
    }

    async fn percentage_of(&self, joined: &EnrollmentWithCourse) -> Result<Percentage, ProgressError> {
        let lesson_ids = joined.course.lesson_ids();
        if lesson_ids.is_empty() {
            return Ok(Percentage::ZERO);
        }

        let completed = self
            .gateway
            .count_completed_lesson_progress(joined.enrollment.user_id, &lesson_ids)
            .await?;

        let total = lesson_ids.len() as u64;
        if completed > total {
            tracing::warn!(completed, total, "completed lesson rows exceed lesson count");
        }

        Ok(Percentage::from_ratio(completed, total))
    }
}

/// One dashboard row: an enrollment with its completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrollmentProgress {
    pub enrollment_id: EnrollmentId,
    pub user_id: UserId,
    pub course_id: CourseId,
    pub course_title: String,
    pub total_lessons: usize,
    pub percentage: Percentage,
}

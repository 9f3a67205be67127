//! `learnhub-progress` — course completion metrics derived from storage reads.
//!
//! - `gateway`: the read-only persistence contract this crate depends on
//! - `aggregator`: completion percentage for one enrollment
//! - `dashboard`: per-role view models built on top of the aggregator

pub mod aggregator;
pub mod dashboard;
pub mod gateway;

pub use aggregator::{EnrollmentProgress, Percentage, ProgressAggregator, ProgressError};
pub use dashboard::{CourseSummary, DashboardService};
pub use gateway::{CourseGateway, GatewayError};

#[cfg(test)]
mod testing;

//! `learnhub-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! typed identifiers, the course/enrollment read model and the domain error.

pub mod course;
pub mod entity;
pub mod enrollment;
pub mod error;
pub mod id;

pub use course::{Course, Lesson, Module};
pub use entity::Entity;
pub use enrollment::{Enrollment, EnrollmentWithCourse, LessonProgress, ProgressStatus};
pub use error::DomainError;
pub use id::{CourseId, EnrollmentId, LessonId, ModuleId, UserId};

//! `CourseGateway` implementations.

pub mod in_memory;
pub mod postgres;
mod tree;

pub use in_memory::InMemoryCourseGateway;
pub use postgres::PostgresCourseGateway;

//! Infrastructure layer: gateway implementations and configuration.

pub mod config;
pub mod gateway;

pub use config::{AppConfig, ConfigError};
pub use gateway::{InMemoryCourseGateway, PostgresCourseGateway};

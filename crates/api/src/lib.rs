//! HTTP API: session resolution, role-gated page trees and dashboards.

pub mod app;
pub mod context;
pub mod middleware;

// src/health/mod.rs
mod checker;
mod report;

pub use checker::HealthChecker;
pub use report::HealthReport;

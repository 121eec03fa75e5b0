use thiserror::Error;

/// Error returned when a health check fails, typically a database connection failure.
#[derive(Debug, Error)]
#[error("failed health check: {0}")]
pub struct HealthCheckFailed(pub anyhow::Error);

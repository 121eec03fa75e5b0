use crate::domain::health::models::HealthCheckFailed;
use std::future::Future;

/// Database port for health check operations.
pub trait HealthRepository: Clone + Send + Sync + 'static {
    fn check_database(&self) -> impl Future<Output = Result<(), HealthCheckFailed>> + Send;
}

/// Service port for health check business logic.
pub trait HealthService: Clone + Send + Sync + 'static {
    fn check_database(&self) -> impl Future<Output = Result<(), HealthCheckFailed>> + Send;
}

//! Health check: verifies the service can reach its database.

pub mod models;
pub mod ports;
pub mod services;

pub use models::HealthCheckFailed;
pub use ports::{HealthRepository, HealthService};
pub use services::Service;

use crate::domain::auth::ports::AuthService;
use crate::domain::health::ports::HealthService;
use crate::domain::sync::ports::SyncService;
use crate::inbound::http::AppState;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Serialize)]
struct RootResponse {
    message: String,
    version: String,
    status: String,
}

pub async fn root() -> Json<Value> {
    Json(json!(RootResponse {
        message: "keepd".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "ready".to_string(),
    }))
}

#[derive(Debug, Serialize)]
struct HealthCheckResponse {
    status: String,
    timestamp: String,
}

impl HealthCheckResponse {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

pub async fn is_server_running() -> Json<Value> {
    Json(json!(HealthCheckResponse::new("healthy")))
}

pub async fn are_server_and_database_running<AS, SS, HS>(
    State(state): State<AppState<AS, SS, HS>>,
) -> Json<Value>
where
    AS: AuthService,
    SS: SyncService,
    HS: HealthService,
{
    let status = match state.health_service.check_database().await {
        Ok(()) => "healthy",
        Err(e) => {
            tracing::warn!("database health check failed: {e}");
            "cannot connect to database"
        }
    };

    Json(json!(HealthCheckResponse::new(status)))
}

//! SyncDB: the one authenticated operation. Requires a valid bearer token
//! (see `middleware::AuthenticatedUser`); everything else is delegated to
//! the sync service, which reconciles the four kinds and clears tombstones.

use crate::domain::auth::ports::AuthService;
use crate::domain::health::ports::HealthService;
use crate::domain::sync::models::wire::WireSyncBatch;
use crate::domain::sync::ports::SyncService;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::{ApiError, ApiSuccess, AppState};

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

pub async fn sync<AS, SS, HS>(
    user: AuthenticatedUser,
    State(state): State<AppState<AS, SS, HS>>,
    Json(body): Json<WireSyncBatch>,
) -> Result<ApiSuccess<WireSyncBatch>, ApiError>
where
    AS: AuthService,
    SS: SyncService,
    HS: HealthService,
{
    let response = state.sync_service.sync(user.uid, body).await?;
    state.sync_service.clear(user.uid).await?;
    Ok(ApiSuccess::new(StatusCode::OK, response))
}

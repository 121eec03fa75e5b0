//! Bearer-token extraction for `SyncDB`.
//!
//! Unlike a typical `Authorization: Bearer <token>` header, this service's
//! token travels bare — no scheme prefix — per §4.1/§4.2. Exactly one
//! `Authorization` header must be present; zero or more than one is
//! rejected the same way an invalid token is.

use crate::domain::auth::ports::AuthService;
use crate::domain::health::ports::HealthService;
use crate::domain::sync::ports::SyncService;
use crate::inbound::http::{ApiError, AppState};

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use std::str::FromStr;

use crate::domain::auth::models::access_token::Jwt;

pub struct AuthenticatedUser {
    pub uid: i64,
}

#[async_trait]
impl<AS, SS, HS> FromRequestParts<AppState<AS, SS, HS>> for AuthenticatedUser
where
    AS: AuthService,
    SS: SyncService,
    HS: HealthService,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<AS, SS, HS>,
    ) -> Result<Self, Self::Rejection> {
        let mut values = parts.headers.get_all(header::AUTHORIZATION).iter();
        let raw = values
            .next()
            .ok_or_else(|| ApiError::PermissionDenied("missing Authorization header".to_string()))?;
        if values.next().is_some() {
            return Err(ApiError::PermissionDenied(
                "exactly one Authorization header is required".to_string(),
            ));
        }

        let raw = raw
            .to_str()
            .map_err(|_| ApiError::PermissionDenied("invalid Authorization header".to_string()))?;

        let jwt = Jwt::from_str(raw)
            .map_err(|_| ApiError::PermissionDenied("invalid token".to_string()))?;

        let uid = state
            .auth_service
            .verify_token(&jwt)
            .map_err(|_| ApiError::PermissionDenied("invalid or expired token".to_string()))?;

        Ok(AuthenticatedUser { uid })
    }
}

//! SignUp / SignIn handlers. Both mint a token and return it in the
//! response's `Authorization` header, bare (no `Bearer` prefix), with an
//! empty body — the token *is* the payload.

use crate::domain::auth::models::error::AuthError;
use crate::domain::auth::ports::AuthService;
use crate::domain::auth::{AccessToken, Credentials, RawCredentials};
use crate::domain::health::ports::HealthService;
use crate::domain::sync::ports::SyncService;
use crate::inbound::http::{ApiError, AppState};

use axum::extract::State;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct HttpCredentials {
    pub login: String,
    pub password: String,
}

fn token_response(status: StatusCode, token: &AccessToken) -> Result<Response, ApiError> {
    let mut response = status.into_response();
    let value = HeaderValue::from_str(token.value.as_str())
        .map_err(|e| ApiError::Internal(format!("token is not a valid header value: {e}")))?;
    response.headers_mut().insert(header::AUTHORIZATION, value);
    Ok(response)
}

pub async fn register<AS, SS, HS>(
    State(state): State<AppState<AS, SS, HS>>,
    Json(body): Json<HttpCredentials>,
) -> Result<Response, ApiError>
where
    AS: AuthService,
    SS: SyncService,
    HS: HealthService,
{
    let credentials = Credentials::try_from(RawCredentials {
        login: body.login,
        password: body.password,
    })
    .map_err(AuthError::from)?;

    let (_, token) = state.auth_service.register(credentials).await?;
    token_response(StatusCode::CREATED, &token)
}

pub async fn login<AS, SS, HS>(
    State(state): State<AppState<AS, SS, HS>>,
    Json(body): Json<HttpCredentials>,
) -> Result<Response, ApiError>
where
    AS: AuthService,
    SS: SyncService,
    HS: HealthService,
{
    let credentials = Credentials::try_from(RawCredentials {
        login: body.login,
        password: body.password,
    })
    .map_err(AuthError::from)?;

    let (_, token) = state.auth_service.login(credentials).await?;
    token_response(StatusCode::OK, &token)
}

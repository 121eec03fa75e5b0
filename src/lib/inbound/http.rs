//! HTTP/JSON binding for the three RPC operations (register, login, sync)
//! plus a health endpoint. Maps the domain-level error categories of §7
//! onto HTTP status codes; the literal wire framing is not load-bearing —
//! any unary-RPC transport could stand in its place.

pub mod handlers;
pub mod middleware;

use crate::domain::auth::ports::AuthService;
use crate::domain::auth::models::error::AuthError;
use crate::domain::health::ports::HealthService;
use crate::domain::sync::models::error::SyncError;
use crate::domain::sync::ports::SyncService;
use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tokio::net;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// configuration for the creation of an `HttpServer`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerConfig<'a> {
    pub bind_address: &'a str,
}

/// shared state handed to every handler: one service per domain
#[derive(Debug, Clone)]
pub struct AppState<AS, SS, HS>
where
    AS: AuthService,
    SS: SyncService,
    HS: HealthService,
{
    pub auth_service: Arc<AS>,
    pub sync_service: Arc<SS>,
    pub health_service: Arc<HS>,
}

/// server with a router and a listener, for running our application
pub struct HttpServer {
    router: Router,
    listener: net::TcpListener,
}

impl HttpServer {
    pub async fn new<AS, SS, HS>(
        auth_service: AS,
        sync_service: SS,
        health_service: HS,
        config: HttpServerConfig<'_>,
    ) -> anyhow::Result<Self>
    where
        AS: AuthService,
        SS: SyncService,
        HS: HealthService,
    {
        let trace_layer = TraceLayer::new_for_http().make_span_with(
            |request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                tracing::info_span!("http_request", method = ?request.method(), uri)
            },
        );

        let state = AppState {
            auth_service: Arc::new(auth_service),
            sync_service: Arc::new(sync_service),
            health_service: Arc::new(health_service),
        };

        let router = Router::new()
            .merge(routes())
            .layer(trace_layer)
            .layer(
                CorsLayer::new()
                    .allow_origin(tower_http::cors::Any)
                    .allow_methods([Method::GET, Method::POST])
                    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                    .expose_headers([header::AUTHORIZATION]),
            )
            .with_state(state);

        let listener = net::TcpListener::bind(config.bind_address)
            .await
            .with_context(|| format!("failed to listen on {}", config.bind_address))?;

        Ok(Self { router, listener })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!("server running on {}", self.listener.local_addr()?);
        axum::serve(self.listener, self.router)
            .await
            .context("received error from running server")?;
        Ok(())
    }
}

fn routes<AS, SS, HS>() -> Router<AppState<AS, SS, HS>>
where
    AS: AuthService,
    SS: SyncService,
    HS: HealthService,
{
    Router::new()
        .route("/", get(handlers::health::root))
        .route("/health/server", get(handlers::health::is_server_running))
        .route(
            "/health/database",
            get(handlers::health::are_server_and_database_running),
        )
        .nest(
            "/api/v1",
            Router::new()
                .route("/auth/register", post(handlers::auth::register))
                .route("/auth/login", post(handlers::auth::login))
                .route("/sync", post(handlers::sync::sync)),
        )
}

// ===========
//  api error
// ===========

/// The four semantic status categories of §7, mapped to HTTP status codes.
/// `Canceled` (user-already-exists) and the others are distinguishable on
/// the wire even though the literal codes are an implementation detail of
/// this particular HTTP binding.
#[derive(Debug)]
pub enum ApiError {
    Canceled(String),
    Unauthenticated(String),
    PermissionDenied(String),
    Internal(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        tracing::error!("{:#}", value);
        Self::Internal("internal error".to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::UserExists => Self::Canceled("user already exists".to_string()),
            AuthError::UserNotFound | AuthError::InvalidPassword => {
                Self::Unauthenticated("invalid login or password".to_string())
            }
            AuthError::InvalidCredentials(e) => {
                tracing::warn!("{e}");
                Self::Internal("internal error".to_string())
            }
            AuthError::Jwt(_) => Self::PermissionDenied("invalid token".to_string()),
            AuthError::Hash(e) => {
                tracing::error!("password hashing failed: {e}");
                Self::Internal("internal error".to_string())
            }
            AuthError::Database(e) => {
                tracing::error!("{:#}", e);
                Self::Internal("internal error".to_string())
            }
        }
    }
}

impl From<SyncError> for ApiError {
    fn from(value: SyncError) -> Self {
        match &value {
            SyncError::InvalidCvv(_) | SyncError::InvalidTimestamp(_) | SyncError::InvalidBase64(_) => {
                tracing::warn!("{value}");
            }
            SyncError::Database(e) => tracing::error!("{:#}", e),
        }
        Self::Internal("internal error".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Canceled(message) => (StatusCode::CONFLICT, message),
            ApiError::Unauthenticated(message) => (StatusCode::UNAUTHORIZED, message),
            ApiError::PermissionDenied(message) => (StatusCode::FORBIDDEN, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

// =============
//  response body
// =============

#[derive(Debug, Serialize, PartialEq)]
pub struct ApiErrorData {
    pub message: String,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        Self(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> axum::response::Response {
        (self.0, self.1).into_response()
    }
}

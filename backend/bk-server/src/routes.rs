use crate::{
    ApiErrorBody, ApiErrorResponse, AppState, check_field, get_profile, health, login,
    provider_callback, refresh, register,
};

use bk_config::ServerConfig;

use std::time::Duration;

use axum::{
    BoxError, Json, Router,
    error_handling::HandleErrorLayer,
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        // Local accounts
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        // Social login completion
        .route("/auth/{provider}/callback", post(provider_callback))
        // Account queries
        .route("/profile", get(get_profile))
        .route("/check", get(check_field))
        // Health check endpoints
        .route("/health", get(health::health))
        .route("/live", get(health::liveness))
        .route("/ready", get(health::readiness))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    server.request_timeout_secs,
                ))),
        )
        .layer(cors_layer(&server.cors_allowed_origins))
}

/// Any origin when the list is empty. Unparseable origins are skipped.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origin = if allowed_origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    log::warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

async fn handle_middleware_error(err: BoxError) -> Response {
    let (status, code, message) = if err.is::<Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            "REQUEST_TIMEOUT",
            "Request timed out",
        )
    } else {
        log::error!("Unhandled middleware error: {}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "Internal server error",
        )
    };

    let body = ApiErrorResponse {
        error: ApiErrorBody {
            code: code.to_string(),
            message: message.to_string(),
            field: None,
        },
    };

    (status, Json(body)).into_response()
}

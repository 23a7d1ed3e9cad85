//! REST API error types
//!
//! Every failure leaves as `{"error": {"code", "message"}}`. The full error,
//! source location included, is logged and never sent to the client.

use bk_auth::AuthError;

use std::panic::Location;

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "INVALID_CREDENTIALS")
    pub code: String,
    pub message: String,
    /// Offending request field, when there is exactly one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Failure reported by the auth services
    #[error("{source} {location}")]
    Auth {
        #[source]
        source: AuthError,
        location: ErrorLocation,
    },

    /// Missing or malformed credentials on a protected route (401)
    #[error("Unauthenticated: {message} {location}")]
    Unauthenticated {
        message: String,
        location: ErrorLocation,
    },

    /// Bad request (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    /// Client-facing error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Auth { source, .. } => source.error_code(),
            ApiError::Unauthenticated { .. } => "UNAUTHENTICATED",
            ApiError::BadRequest { .. } => "BAD_REQUEST",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.code() {
            "INVALID_CREDENTIALS" | "UNAUTHENTICATED" => StatusCode::UNAUTHORIZED,
            "DUPLICATE_EMAIL" | "CONCURRENT_MODIFICATION" => StatusCode::CONFLICT,
            "MISSING_FIELDS"
            | "MALFORMED_PROVIDER_PROFILE"
            | "UNSUPPORTED_PROVIDER"
            | "BAD_REQUEST" => StatusCode::BAD_REQUEST,
            "RATE_LIMITED" => StatusCode::TOO_MANY_REQUESTS,
            "SERVICE_UNAVAILABLE" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(self) -> ApiErrorBody {
        let code = self.code().to_string();
        let (message, field) = match self {
            ApiError::Auth { source, .. } => (public_message(&source), None),
            ApiError::Unauthenticated { .. } => ("Authentication required".to_string(), None),
            ApiError::BadRequest { message, field, .. } => (message, field),
            ApiError::Internal { .. } => ("Internal server error".to_string(), None),
        };

        ApiErrorBody {
            code,
            message,
            field,
        }
    }
}

/// Message safe to show a client. Identifiers and causes stay in the logs.
fn public_message(error: &AuthError) -> String {
    match error {
        AuthError::InvalidCredentials { .. } => "Invalid email or password".to_string(),
        AuthError::DuplicateEmail { .. } => "Email already registered".to_string(),
        AuthError::MissingFields { fields, .. } => {
            format!("Missing required fields: {}", fields.join(", "))
        }
        AuthError::MalformedProviderProfile { .. } => "Provider profile is invalid".to_string(),
        AuthError::UnsupportedProvider { .. } => "Provider is not supported".to_string(),
        AuthError::ConcurrentModification { .. } => {
            "Account was modified concurrently, try again".to_string()
        }
        AuthError::RateLimitExceeded { window_secs, .. } => {
            format!("Too many login attempts, retry within {}s", window_secs)
        }
        AuthError::StorageUnavailable { .. } => "Service temporarily unavailable".to_string(),
        e if e.error_code() == "UNAUTHENTICATED" => "Authentication required".to_string(),
        _ => "Internal server error".to_string(),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        (status, Json(ApiErrorResponse { error: self.body() })).into_response()
    }
}

impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(source: AuthError) -> Self {
        ApiError::Auth {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Unreadable JSON bodies keep the error body shape
impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            message: format!("Invalid JSON body: {}", rejection.body_text()),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    #[track_caller]
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest {
            message: format!("Invalid query string: {}", rejection.body_text()),
            field: None,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

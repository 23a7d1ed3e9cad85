use bk_db::DbError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    #[error("Email already registered {location}")]
    DuplicateEmail { location: ErrorLocation },

    #[error("Missing required fields: {} {location}", fields.join(", "))]
    MissingFields {
        fields: Vec<String>,
        location: ErrorLocation,
    },

    #[error("Malformed provider profile: {message} {location}")]
    MalformedProviderProfile {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unsupported provider: {provider} {location}")]
    UnsupportedProvider {
        provider: String,
        location: ErrorLocation,
    },

    #[error("Concurrent modification persisted after {attempts} attempts {location}")]
    ConcurrentModification {
        attempts: u32,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Invalid token signature {location}")]
    InvalidSignature { location: ErrorLocation },

    #[error("Malformed token: {message} {location}")]
    MalformedToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Token issuance failed: {source} {location}")]
    TokenIssue {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Account not found {location}")]
    AccountNotFound { location: ErrorLocation },

    #[error("Rate limit exceeded: {limit} attempts per {window_secs}s {location}")]
    RateLimitExceeded {
        limit: u32,
        window_secs: u64,
        location: ErrorLocation,
    },

    #[error("Storage unavailable: {message} {location}")]
    StorageUnavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Storage error: {source} {location}")]
    Storage {
        #[source]
        source: DbError,
        location: ErrorLocation,
    },

    #[error("Password hashing failed: {message} {location}")]
    PasswordHash {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Stable code sent to clients
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
            Self::DuplicateEmail { .. } => "DUPLICATE_EMAIL",
            Self::MissingFields { .. } => "MISSING_FIELDS",
            Self::MalformedProviderProfile { .. } => "MALFORMED_PROVIDER_PROFILE",
            Self::UnsupportedProvider { .. } => "UNSUPPORTED_PROVIDER",
            Self::ConcurrentModification { .. } => "CONCURRENT_MODIFICATION",
            Self::TokenExpired { .. }
            | Self::InvalidSignature { .. }
            | Self::MalformedToken { .. }
            | Self::InvalidClaim { .. }
            | Self::AccountNotFound { .. } => "UNAUTHENTICATED",
            Self::RateLimitExceeded { .. } => "RATE_LIMITED",
            Self::StorageUnavailable { .. } => "SERVICE_UNAVAILABLE",
            Self::TokenIssue { .. } | Self::Storage { .. } | Self::PasswordHash { .. } => {
                "INTERNAL_ERROR"
            }
        }
    }

    /// Whether the error came from token verification
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            Self::TokenExpired { .. }
                | Self::InvalidSignature { .. }
                | Self::MalformedToken { .. }
                | Self::InvalidClaim { .. }
        )
    }
}

impl From<DbError> for AuthError {
    #[track_caller]
    fn from(source: DbError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        match source {
            DbError::Unavailable { message, .. } => Self::StorageUnavailable { message, location },
            DbError::DuplicateEmail { .. } => Self::DuplicateEmail { location },
            DbError::Conflict { .. } => Self::ConcurrentModification {
                attempts: 1,
                location,
            },
            source => Self::Storage { source, location },
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;

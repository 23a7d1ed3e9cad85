use bk_core::ErrorLocation;

use std::panic::Location;

use thiserror::Error;

// SQLite extended result codes that mean "another writer holds the lock"
const SQLITE_BUSY_CODES: &[&str] = &["5", "6", "261", "262", "517"];

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    #[error("Concurrent modification: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    #[error("Email already registered {location}")]
    DuplicateEmail { location: ErrorLocation },

    #[error("Record not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid argument: {message} {location}")]
    InvalidArgument {
        message: String,
        location: ErrorLocation,
    },

    #[error("Corrupt row: {message} {location}")]
    Corrupt {
        message: String,
        location: ErrorLocation,
    },
}

impl DbError {
    /// Whether retrying the whole unit of work may succeed
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    #[track_caller]
    pub(crate) fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        let location = ErrorLocation::from(Location::caller());

        if matches!(
            source,
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
        ) {
            return Self::Unavailable {
                message: source.to_string(),
                location,
            };
        }

        if let Some(db) = source.as_database_error() {
            let busy = db
                .code()
                .is_some_and(|code| SQLITE_BUSY_CODES.iter().any(|busy| code == *busy));
            if busy || db.is_unique_violation() {
                return Self::Conflict {
                    message: db.message().to_string(),
                    location,
                };
            }
        }

        Self::Sqlx { source, location }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;

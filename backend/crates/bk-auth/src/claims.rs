use crate::{AuthError, Result as AuthErrorResult, TokenKind};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Account id
    pub id: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub kind: TokenKind,
    /// Issued at timestamp (Unix)
    pub iat: i64,
    /// Expiration timestamp (Unix)
    pub exp: i64,
}

impl Claims {
    /// Validate claims after signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.id.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "id".to_string(),
                message: "id cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if Uuid::parse_str(&self.id).is_err() {
            return Err(AuthError::InvalidClaim {
                claim: "id".to_string(),
                message: "id is not a valid account id".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.exp <= self.iat {
            return Err(AuthError::InvalidClaim {
                claim: "exp".to_string(),
                message: "exp must be after iat".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Account id as a UUID. Only valid after [`Claims::validate`].
    #[track_caller]
    pub fn account_id(&self) -> AuthErrorResult<Uuid> {
        Uuid::parse_str(&self.id).map_err(|e| AuthError::InvalidClaim {
            claim: "id".to_string(),
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

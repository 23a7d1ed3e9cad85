use crate::{AuthError, Claims, Result as AuthErrorResult, TokenConfig, TokenKind};

use bk_core::Account;

use std::panic::Location;

use chrono::Utc;
use error_location::ErrorLocation;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;

/// Access and refresh token issued together
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub token: String,
    pub refresh_token: String,
}

/// HS256 issuer and verifier for session tokens.
///
/// Built once at startup from [`TokenConfig`] and shared behind an `Arc`.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl TokenService {
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = config.leeway_secs;

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            access_ttl_secs: config.access_ttl_secs as i64,
            refresh_ttl_secs: config.refresh_ttl_secs as i64,
        }
    }

    pub fn ttl_secs(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.access_ttl_secs,
            TokenKind::Refresh => self.refresh_ttl_secs,
        }
    }

    #[track_caller]
    pub fn issue(&self, account: &Account, kind: TokenKind) -> AuthErrorResult<String> {
        self.issue_at(account, kind, Utc::now().timestamp())
    }

    /// Issue with an explicit issue time
    #[track_caller]
    pub fn issue_at(&self, account: &Account, kind: TokenKind, iat: i64) -> AuthErrorResult<String> {
        let claims = Claims {
            id: account.id.to_string(),
            roles: account.roles_vec(),
            kind,
            iat,
            exp: iat + self.ttl_secs(kind),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AuthError::TokenIssue {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    #[track_caller]
    pub fn issue_pair(&self, account: &Account) -> AuthErrorResult<TokenPair> {
        Ok(TokenPair {
            token: self.issue(account, TokenKind::Access)?,
            refresh_token: self.issue(account, TokenKind::Refresh)?,
        })
    }

    /// Verify signature, expiry and claims
    #[track_caller]
    pub fn verify(&self, token: &str) -> AuthErrorResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                let location = ErrorLocation::from(Location::caller());
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired { location },
                    ErrorKind::InvalidSignature => AuthError::InvalidSignature { location },
                    _ => AuthError::MalformedToken {
                        message: e.to_string(),
                        location,
                    },
                }
            })?;

        token_data.claims.validate()?;

        Ok(token_data.claims)
    }

    /// [`TokenService::verify`] plus a check that the token is of `kind`
    #[track_caller]
    pub fn verify_kind(&self, token: &str, kind: TokenKind) -> AuthErrorResult<Claims> {
        let claims = self.verify(token)?;

        if claims.kind != kind {
            return Err(AuthError::InvalidClaim {
                claim: "kind".to_string(),
                message: format!("expected {} token, got {}", kind, claims.kind),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(claims)
    }
}

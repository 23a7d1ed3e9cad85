//! Access-token authentication for protected routes

use crate::{ApiError, AppState};

use bk_auth::{AuthError, TokenKind};
use bk_core::Account;

use std::future::Future;
use std::panic::Location;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use error_location::ErrorLocation;

/// The account behind a valid `Authorization: Bearer <access token>`.
///
/// Refresh tokens are rejected, as are tokens whose account no longer exists.
pub struct BearerAccount(pub Account);

impl FromRequestParts<AppState> for BearerAccount {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let token = bearer_token(parts)?;

            let claims = state.tokens.verify_kind(token, TokenKind::Access)?;
            let account_id = claims.account_id()?;

            match state.store.find_account_by_id(account_id).await {
                Ok(Some(account)) => Ok(BearerAccount(account)),
                Ok(None) => {
                    log::debug!("Token for unknown account {}", account_id);
                    Err(ApiError::from(AuthError::AccountNotFound {
                        location: ErrorLocation::from(Location::caller()),
                    }))
                }
                Err(e) => Err(ApiError::from(AuthError::from(e))),
            }
        }
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let missing = |message: &str| ApiError::Unauthenticated {
        message: message.to_string(),
        location: ErrorLocation::from(Location::caller()),
    };

    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| missing("missing Authorization header"))?
        .to_str()
        .map_err(|_| missing("Authorization header is not valid ASCII"))?;

    match header.split_once(' ') {
        Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.trim().is_empty() => {
            Ok(token.trim())
        }
        _ => Err(missing("Authorization header is not a bearer token")),
    }
}

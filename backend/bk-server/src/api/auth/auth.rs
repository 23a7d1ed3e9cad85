//! Local account handlers: registration, password login and token refresh.

use crate::{ApiResult, AppState, LoginRequest, RefreshRequest, RegisterRequest};

use bk_auth::{AuthError, TokenKind, TokenPair};
use bk_core::LoginAttempt;

use std::panic::Location;
use std::time::Instant;

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use error_location::ErrorLocation;
use log::info;

/// POST /register
///
/// Create a local account and sign a token pair for it
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Json<TokenPair>> {
    let Json(request) = payload?;

    let started = Instant::now();
    let account = state
        .resolver
        .resolve(LoginAttempt::Local(request.into()))
        .await
        .inspect_err(|e| {
            state.metrics.registration_failed();
            state.metrics.error_occurred(e.error_code());
        })?;
    state.metrics.resolve_latency(started.elapsed());
    state.metrics.registration_succeeded();

    info!("Registered local account {}", account.id);

    Ok(Json(state.tokens.issue_pair(&account)?))
}

/// POST /login
///
/// Exchange email and password for a token pair
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<TokenPair>> {
    let Json(request) = payload?;

    let record_failure = |e: &AuthError| {
        state.metrics.login_failed("local");
        state.metrics.error_occurred(e.error_code());
    };

    state
        .login_limiter
        .check(&request.email)
        .inspect_err(record_failure)?;

    let account = state
        .verifier
        .verify(&request.email, &request.password)
        .await
        .inspect_err(record_failure)?;
    state.metrics.login_succeeded("local");

    info!("Local login for account {}", account.id);

    Ok(Json(state.tokens.issue_pair(&account)?))
}

/// POST /refresh
///
/// Trade a refresh token for a new pair. The account must still exist.
pub async fn refresh(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> ApiResult<Json<TokenPair>> {
    let Json(request) = payload?;

    let claims = state
        .tokens
        .verify_kind(&request.refresh_token, TokenKind::Refresh)
        .inspect_err(|e| state.metrics.error_occurred(e.error_code()))?;
    let account_id = claims.account_id()?;

    let account = state
        .store
        .find_account_by_id(account_id)
        .await
        .map_err(AuthError::from)?
        .ok_or_else(|| AuthError::AccountNotFound {
            location: ErrorLocation::from(Location::caller()),
        })?;

    state.metrics.token_refreshed();

    Ok(Json(state.tokens.issue_pair(&account)?))
}

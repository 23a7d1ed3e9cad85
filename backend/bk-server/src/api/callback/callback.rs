//! Social login completion.
//!
//! The OAuth handshake itself happens upstream; this endpoint receives the
//! provider's user-info JSON, resolves it to an account and sends the browser
//! back to the frontend with either a token pair or an error code.

use crate::{ApiError, ApiResult, AppState, failure_redirect_url, login_redirect_url};

use bk_auth::{TokenPair, normalize};
use bk_core::LoginAttempt;

use std::time::Instant;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    response::Redirect,
};
use log::{info, warn};
use serde_json::Value;

/// POST /auth/{provider}/callback
///
/// Always answers with a 303 redirect
pub async fn provider_callback(
    State(state): State<AppState>,
    Path(provider): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Redirect {
    match resolve_provider_login(&state, &provider, payload).await {
        Ok(pair) => Redirect::to(&login_redirect_url(&state.frontend.login_redirect, &pair)),
        Err(e) => {
            warn!("{} login failed: {}", provider, e);
            state.metrics.login_failed("external");
            state.metrics.error_occurred(e.code());
            Redirect::to(&failure_redirect_url(
                &state.frontend.failure_redirect,
                e.code(),
            ))
        }
    }
}

async fn resolve_provider_login(
    state: &AppState,
    provider: &str,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<TokenPair> {
    let Json(raw) = payload.map_err(ApiError::from)?;
    let profile = normalize(provider, &raw)?;
    let provider = profile.provider;

    let started = Instant::now();
    let account = state
        .resolver
        .resolve(LoginAttempt::External(profile))
        .await?;
    state.metrics.resolve_latency(started.elapsed());
    state.metrics.login_succeeded(provider.as_str());

    info!("{} login resolved to account {}", provider, account.id);

    Ok(state.tokens.issue_pair(&account)?)
}

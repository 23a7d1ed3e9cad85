use crate::{ApiResult, AppState, BearerAccount, ProfileDto};

use bk_auth::AuthError;

use axum::{Json, extract::State};

/// GET /profile
///
/// The authenticated account with its linked providers
pub async fn get_profile(
    State(state): State<AppState>,
    BearerAccount(account): BearerAccount,
) -> ApiResult<Json<ProfileDto>> {
    let links = state
        .store
        .find_provider_links(account.id)
        .await
        .map_err(AuthError::from)?;

    Ok(Json(ProfileDto::new(account, &links)))
}

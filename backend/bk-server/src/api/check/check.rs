use crate::{ApiError, ApiResult, AppState, CheckQuery, CheckResponse};

use bk_auth::AuthError;
use bk_db::AccountField;

use std::panic::Location;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
};
use error_location::ErrorLocation;

/// GET /check?fld=&data=
///
/// Availability probe for registration forms: 409 when an account already
/// holds the value, 200 when it is free.
pub async fn check_field(
    State(state): State<AppState>,
    query: Result<Query<CheckQuery>, QueryRejection>,
) -> ApiResult<(StatusCode, Json<CheckResponse>)> {
    let Query(query) = query?;

    let fld = required(query.fld, "fld")?;
    let data = required(query.data, "data")?;

    let field: AccountField = fld.parse().map_err(|_| ApiError::BadRequest {
        message: "fld must be one of: email, celular, displayName".to_string(),
        field: Some("fld".to_string()),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let exists = state
        .store
        .field_value_exists(field, &data)
        .await
        .map_err(AuthError::from)?;

    let status = if exists {
        StatusCode::CONFLICT
    } else {
        StatusCode::OK
    };

    Ok((status, Json(CheckResponse { exists })))
}

#[track_caller]
fn required(value: Option<String>, name: &str) -> ApiResult<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::BadRequest {
            message: format!("Query parameter '{}' is required", name),
            field: Some(name.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }),
    }
}

use crate::ApiError;

use bk_auth::AuthError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use googletest::prelude::*;
use http::StatusCode;
use http_body_util::BodyExt;

fn here() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_invalid_credentials_when_rendered_then_401_with_code() {
    // Given
    let error = ApiError::from(AuthError::InvalidCredentials { location: here() });

    // When
    let (status, json) = body_json(error).await;

    // Then
    assert_that!(status, eq(StatusCode::UNAUTHORIZED));
    assert_that!(json["error"]["code"].as_str(), some(eq("INVALID_CREDENTIALS")));
    assert_that!(
        json["error"]["message"].as_str(), some(eq("Invalid email or password"))
    );
}

#[tokio::test]
async fn given_duplicate_email_when_rendered_then_409() {
    let (status, json) =
        body_json(ApiError::from(AuthError::DuplicateEmail { location: here() })).await;

    assert_that!(status, eq(StatusCode::CONFLICT));
    assert_that!(json["error"]["code"].as_str(), some(eq("DUPLICATE_EMAIL")));
}

#[tokio::test]
async fn given_missing_fields_when_rendered_then_400_naming_fields() {
    // Given
    let error = ApiError::from(AuthError::MissingFields {
        fields: vec!["email".to_string(), "displayName".to_string()],
        location: here(),
    });

    // When
    let (status, json) = body_json(error).await;

    // Then
    assert_that!(status, eq(StatusCode::BAD_REQUEST));
    assert_that!(json["error"]["code"].as_str(), some(eq("MISSING_FIELDS")));
    assert_that!(
        json["error"]["message"].as_str().unwrap(),
        contains_substring("email, displayName")
    );
}

#[tokio::test]
async fn given_token_errors_when_rendered_then_all_collapse_to_unauthenticated() {
    let errors = vec![
        AuthError::TokenExpired { location: here() },
        AuthError::InvalidSignature { location: here() },
        AuthError::MalformedToken {
            message: "bad segment".to_string(),
            location: here(),
        },
        AuthError::InvalidClaim {
            claim: "kind".to_string(),
            message: "expected access".to_string(),
            location: here(),
        },
        AuthError::AccountNotFound { location: here() },
    ];

    for error in errors {
        let (status, json) = body_json(ApiError::from(error)).await;

        assert_that!(status, eq(StatusCode::UNAUTHORIZED));
        assert_that!(json["error"]["code"].as_str(), some(eq("UNAUTHENTICATED")));
        assert_that!(
            json["error"]["message"].as_str(), some(eq("Authentication required"))
        );
    }
}

#[tokio::test]
async fn given_rate_limit_when_rendered_then_429() {
    let error = ApiError::from(AuthError::RateLimitExceeded {
        limit: 5,
        window_secs: 60,
        location: here(),
    });

    let (status, json) = body_json(error).await;

    assert_that!(status, eq(StatusCode::TOO_MANY_REQUESTS));
    assert_that!(json["error"]["code"].as_str(), some(eq("RATE_LIMITED")));
}

#[tokio::test]
async fn given_storage_unavailable_when_rendered_then_503_without_details() {
    // Given
    let error = ApiError::from(AuthError::StorageUnavailable {
        message: "pool timed out at /var/lib/identity.db".to_string(),
        location: here(),
    });

    // When
    let (status, json) = body_json(error).await;

    // Then
    assert_that!(status, eq(StatusCode::SERVICE_UNAVAILABLE));
    assert_that!(json["error"]["code"].as_str(), some(eq("SERVICE_UNAVAILABLE")));
    assert_that!(
        json["error"]["message"].as_str().unwrap(),
        not(contains_substring("identity.db"))
    );
}

#[tokio::test]
async fn given_password_hash_failure_when_rendered_then_opaque_500() {
    let error = ApiError::from(AuthError::PasswordHash {
        message: "argon2 params rejected".to_string(),
        location: here(),
    });

    let (status, json) = body_json(error).await;

    assert_that!(status, eq(StatusCode::INTERNAL_SERVER_ERROR));
    assert_that!(json["error"]["code"].as_str(), some(eq("INTERNAL_ERROR")));
    assert_that!(
        json["error"]["message"].as_str(), some(eq("Internal server error"))
    );
}

#[tokio::test]
async fn given_bad_request_with_field_when_rendered_then_field_is_included() {
    let error = ApiError::BadRequest {
        message: "Query parameter 'fld' is required".to_string(),
        field: Some("fld".to_string()),
        location: here(),
    };

    let (status, json) = body_json(error).await;

    assert_that!(status, eq(StatusCode::BAD_REQUEST));
    assert_that!(json["error"]["code"].as_str(), some(eq("BAD_REQUEST")));
    assert_that!(json["error"]["field"].as_str(), some(eq("fld")));
}

#[tokio::test]
async fn given_error_without_field_when_rendered_then_field_is_omitted() {
    let (_, json) = body_json(ApiError::from(AuthError::DuplicateEmail { location: here() })).await;

    assert_that!(json["error"].get("field"), none());
}

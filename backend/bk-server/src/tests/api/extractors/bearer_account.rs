use crate::tests::create_test_state;
use crate::{ApiError, AppState, BearerAccount};

use bk_auth::TokenKind;
use bk_core::Account;

use axum::{body::Body, extract::FromRequestParts, http::Request};
use googletest::prelude::*;

async fn extract(state: &AppState, authorization: Option<&str>) -> Result<BearerAccount, ApiError> {
    let mut builder = Request::builder().uri("/profile");
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }
    let (mut parts, _body) = builder.body(Body::empty()).unwrap().into_parts();

    BearerAccount::from_request_parts(&mut parts, state).await
}

async fn stored_account(state: &AppState) -> Account {
    let account = Account::new_local(
        "ana@example.com".to_string(),
        "Ana".to_string(),
        None,
        "digest".to_string(),
    );
    state.store.insert_account(&account).await.unwrap();
    account
}

#[tokio::test]
async fn given_valid_access_token_when_extracting_then_account_is_loaded() {
    // Given
    let state = create_test_state().await;
    let account = stored_account(&state).await;
    let token = state.tokens.issue(&account, TokenKind::Access).unwrap();

    // When
    let result = extract(&state, Some(&format!("Bearer {}", token))).await;

    // Then
    let BearerAccount(loaded) = result.unwrap();
    assert_that!(loaded.id, eq(account.id));
    assert_that!(loaded.email.as_deref(), some(eq("ana@example.com")));
}

#[tokio::test]
async fn given_lowercase_scheme_when_extracting_then_token_is_accepted() {
    let state = create_test_state().await;
    let account = stored_account(&state).await;
    let token = state.tokens.issue(&account, TokenKind::Access).unwrap();

    let result = extract(&state, Some(&format!("bearer {}", token))).await;

    assert_that!(result.is_ok(), eq(true));
}

#[tokio::test]
async fn given_no_header_when_extracting_then_unauthenticated() {
    let state = create_test_state().await;

    let result = extract(&state, None).await;

    let error = result.err().unwrap();
    assert_that!(error.code(), eq("UNAUTHENTICATED"));
    assert_that!(error.status().as_u16(), eq(401));
}

#[tokio::test]
async fn given_basic_scheme_when_extracting_then_unauthenticated() {
    let state = create_test_state().await;

    let result = extract(&state, Some("Basic YW5hOnNlY3JldA==")).await;

    assert_that!(result.err().unwrap().code(), eq("UNAUTHENTICATED"));
}

#[tokio::test]
async fn given_refresh_token_when_extracting_then_rejected() {
    // Given
    let state = create_test_state().await;
    let account = stored_account(&state).await;
    let refresh = state.tokens.issue(&account, TokenKind::Refresh).unwrap();

    // When
    let result = extract(&state, Some(&format!("Bearer {}", refresh))).await;

    // Then
    let error = result.err().unwrap();
    assert_that!(error.code(), eq("UNAUTHENTICATED"));
    assert_that!(error.status().as_u16(), eq(401));
}

#[tokio::test]
async fn given_token_for_deleted_account_when_extracting_then_unauthenticated() {
    // Given: a token for an account that was never stored
    let state = create_test_state().await;
    let ghost = Account::new_local(
        "ghost@example.com".to_string(),
        "Ghost".to_string(),
        None,
        "digest".to_string(),
    );
    let token = state.tokens.issue(&ghost, TokenKind::Access).unwrap();

    // When
    let result = extract(&state, Some(&format!("Bearer {}", token))).await;

    // Then
    assert_that!(result.err().unwrap().code(), eq("UNAUTHENTICATED"));
}

#[tokio::test]
async fn given_garbage_token_when_extracting_then_unauthenticated() {
    let state = create_test_state().await;

    let result = extract(&state, Some("Bearer not-a-jwt")).await;

    assert_that!(result.err().unwrap().code(), eq("UNAUTHENTICATED"));
}

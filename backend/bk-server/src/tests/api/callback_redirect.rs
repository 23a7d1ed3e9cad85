use crate::{failure_redirect_url, login_redirect_url};

use bk_auth::TokenPair;

use googletest::prelude::*;

#[test]
fn given_plain_base_when_building_login_redirect_then_tokens_are_query_params() {
    // Given
    let pair = TokenPair {
        token: "aaa.bbb.ccc".to_string(),
        refresh_token: "ddd.eee.fff".to_string(),
    };

    // When
    let url = login_redirect_url("http://localhost:4200/auth/login", &pair);

    // Then
    assert_that!(
        url,
        eq("http://localhost:4200/auth/login?token=aaa.bbb.ccc&refreshToken=ddd.eee.fff")
    );
}

#[test]
fn given_base_with_query_when_building_redirect_then_params_are_appended() {
    let url = failure_redirect_url("http://app/login?lang=es", "INVALID_CREDENTIALS");

    assert_that!(url, eq("http://app/login?lang=es&error=INVALID_CREDENTIALS"));
}

#[test]
fn given_reserved_characters_when_building_redirect_then_values_are_encoded() {
    let pair = TokenPair {
        token: "a+b/c=".to_string(),
        refresh_token: "x&y".to_string(),
    };

    let url = login_redirect_url("http://app/cb", &pair);

    assert_that!(url, eq("http://app/cb?token=a%2Bb%2Fc%3D&refreshToken=x%26y"));
}

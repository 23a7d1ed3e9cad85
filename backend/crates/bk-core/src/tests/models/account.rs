use crate::{Account, DEFAULT_ROLE, ExternalProfile, Provider};

use googletest::matchers::is_empty as empty;
use googletest::prelude::*;
use uuid::Uuid;

fn google_profile(email: Option<&str>) -> ExternalProfile {
    ExternalProfile {
        provider: Provider::Google,
        provider_id: "g1".to_string(),
        emails: email.map(|e| vec![e.to_string()]).unwrap_or_default(),
        display_name: Some("Ana".to_string()),
        picture: Some("http://pic".to_string()),
        raw_payload: serde_json::json!({ "sub": "g1" }),
    }
}

#[test]
fn test_new_local_account_defaults() {
    let account = Account::new_local(
        "a@x.com".to_string(),
        "A".to_string(),
        Some("555".to_string()),
        "$argon2id$digest".to_string(),
    );

    assert_that!(account.email.as_deref(), some(eq("a@x.com")));
    assert_that!(account.display_name.as_deref(), some(eq("A")));
    assert_that!(account.phone.as_deref(), some(eq("555")));
    assert_that!(account.email_verified, eq(false));
    assert_that!(account.phone_verified, eq(false));
    assert_that!(account.has_password(), eq(true));
    assert_that!(account.has_role(DEFAULT_ROLE), eq(true));
    assert_that!(account.roles.len(), eq(1));
    assert_that!(account.provider_links, empty());
    assert_that!(account.version, eq(1));
}

#[test]
fn test_new_external_account_is_verified_and_passwordless() {
    let account = Account::new_external(&google_profile(Some("a@x.com")));

    assert_that!(account.email.as_deref(), some(eq("a@x.com")));
    assert_that!(account.email_verified, eq(true));
    assert_that!(account.picture.as_deref(), some(eq("http://pic")));
    assert_that!(account.has_password(), eq(false));
    assert_that!(account.has_role(DEFAULT_ROLE), eq(true));
}

#[test]
fn test_new_external_account_without_email() {
    let account = Account::new_external(&google_profile(None));

    assert_that!(account.email, none());
}

#[test]
fn test_attach_link_is_idempotent() {
    let mut account = Account::new_external(&google_profile(Some("a@x.com")));
    let link_id = Uuid::new_v4();

    assert_that!(account.attach_link(link_id), eq(true));
    assert_that!(account.attach_link(link_id), eq(false));
    assert_that!(account.provider_links, elements_are![eq(&link_id)]);
}

#[test]
fn test_password_digest_is_never_serialized() {
    let account = Account::new_local(
        "a@x.com".to_string(),
        "A".to_string(),
        None,
        "secret-digest".to_string(),
    );

    let json = serde_json::to_string(&account).unwrap();

    assert_that!(json, not(contains_substring("secret-digest")));
    assert_that!(json, not(contains_substring("password_digest")));
}

#[test]
fn test_new_external_account_normalizes_email() {
    let account = Account::new_external(&google_profile(Some(" Ana@X.com ")));

    assert_that!(account.email.as_deref(), some(eq("ana@x.com")));
}

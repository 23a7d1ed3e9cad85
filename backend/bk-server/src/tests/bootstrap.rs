use crate::tests::create_test_state;
use crate::{BootstrapOutcome, ensure_admin};

use bk_auth::password_hasher::verify_blocking;
use bk_config::BootstrapConfig;
use bk_core::{ADMIN_ROLE, Account, DEFAULT_ROLE};

use googletest::prelude::*;

fn admin_config() -> BootstrapConfig {
    BootstrapConfig {
        email: Some("Admin@Example.com".to_string()),
        password: Some("admin-password".to_string()),
        display_name: "Administrator".to_string(),
    }
}

#[tokio::test]
async fn given_no_credentials_when_bootstrapping_then_skipped() {
    let state = create_test_state().await;

    let outcome = ensure_admin(&state, &BootstrapConfig::default()).await.unwrap();

    assert_that!(outcome, eq(&BootstrapOutcome::Skipped));
}

#[tokio::test]
async fn given_empty_store_when_bootstrapping_then_admin_is_created() {
    // Given
    let state = create_test_state().await;

    // When
    let outcome = ensure_admin(&state, &admin_config()).await.unwrap();

    // Then
    let BootstrapOutcome::Created(id) = outcome else {
        panic!("expected Created, got {:?}", outcome);
    };
    let admin = state.store.find_account_by_id(id).await.unwrap().unwrap();
    assert_that!(admin.email.as_deref(), some(eq("admin@example.com")));
    assert_that!(admin.has_role(ADMIN_ROLE), eq(true));
    assert_that!(admin.has_role(DEFAULT_ROLE), eq(false));

    let digest = admin.password_digest.clone().unwrap();
    let matches = verify_blocking(state.hasher.clone(), "admin-password".to_string(), digest)
        .await
        .unwrap();
    assert_that!(matches, eq(true));
}

#[tokio::test]
async fn given_existing_account_when_bootstrapping_then_it_is_left_untouched() {
    // Given
    let state = create_test_state().await;
    let existing = Account::new_local(
        "admin@example.com".to_string(),
        "Someone".to_string(),
        None,
        "digest".to_string(),
    );
    state.store.insert_account(&existing).await.unwrap();

    // When
    let outcome = ensure_admin(&state, &admin_config()).await.unwrap();

    // Then
    assert_that!(outcome, eq(&BootstrapOutcome::AlreadyExists(existing.id)));
    let stored = state
        .store
        .find_account_by_id(existing.id)
        .await
        .unwrap()
        .unwrap();
    assert_that!(stored.has_role(ADMIN_ROLE), eq(false));
    assert_that!(stored.display_name.as_deref(), some(eq("Someone")));
}

#[tokio::test]
async fn given_admin_already_created_when_bootstrapping_again_then_idempotent() {
    let state = create_test_state().await;

    let first = ensure_admin(&state, &admin_config()).await.unwrap();
    let second = ensure_admin(&state, &admin_config()).await.unwrap();

    let BootstrapOutcome::Created(id) = first else {
        panic!("expected Created, got {:?}", first);
    };
    assert_that!(second, eq(&BootstrapOutcome::AlreadyExists(id)));
}

use crate::password_hasher::{hash_blocking, verify_blocking};
use crate::{AuthError, PasswordHasher, Result as AuthErrorResult};

use bk_core::Account;
use bk_db::IdentityStore;

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, warn};
use tokio::sync::OnceCell;

const DUMMY_SECRET: &str = "bk-auth-dummy-password";

/// Checks email + password against the stored digest.
///
/// Every failure reaches the caller as [`AuthError::InvalidCredentials`];
/// the concrete cause is only logged. An unknown email or a provider-only
/// account still pays for one digest comparison, against a dummy digest made
/// by the same hasher, so all rejections cost about the same.
pub struct CredentialVerifier {
    store: Arc<dyn IdentityStore>,
    hasher: Arc<dyn PasswordHasher>,
    dummy_digest: OnceCell<String>,
}

impl CredentialVerifier {
    pub fn new(store: Arc<dyn IdentityStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            store,
            hasher,
            dummy_digest: OnceCell::new(),
        }
    }

    pub async fn verify(&self, email: &str, candidate_password: &str) -> AuthErrorResult<Account> {
        let Some(account) = self.store.find_account_by_email(email).await? else {
            debug!("Login rejected: no account for email");
            self.verify_against_dummy(candidate_password).await;
            return Err(invalid_credentials());
        };

        let Some(digest) = account.password_digest.clone() else {
            debug!("Login rejected: account {} has no password", account.id);
            self.verify_against_dummy(candidate_password).await;
            return Err(invalid_credentials());
        };

        let matches = match verify_blocking(
            Arc::clone(&self.hasher),
            candidate_password.to_string(),
            digest,
        )
        .await
        {
            Ok(matches) => matches,
            Err(e) => {
                warn!("Password check failed for account {}: {}", account.id, e);
                false
            }
        };

        if !matches {
            debug!("Login rejected: wrong password for account {}", account.id);
            return Err(invalid_credentials());
        }

        Ok(account)
    }

    /// Compare `candidate_password` against the dummy digest and discard the result
    async fn verify_against_dummy(&self, candidate_password: &str) {
        let digest = self
            .dummy_digest
            .get_or_try_init(|| hash_blocking(Arc::clone(&self.hasher), DUMMY_SECRET.to_string()))
            .await;

        match digest {
            Ok(digest) => {
                let _ = verify_blocking(
                    Arc::clone(&self.hasher),
                    candidate_password.to_string(),
                    digest.clone(),
                )
                .await;
            }
            Err(e) => warn!("Could not build dummy password digest: {}", e),
        }
    }
}

#[track_caller]
fn invalid_credentials() -> AuthError {
    AuthError::InvalidCredentials {
        location: ErrorLocation::from(Location::caller()),
    }
}

//! Administrator account ensured at startup

use crate::AppState;
use crate::error::Result as ServerErrorResult;

use bk_auth::password_hasher::hash_blocking;
use bk_config::BootstrapConfig;
use bk_core::{ADMIN_ROLE, Account, normalize_email};
use bk_db::DbError;

use std::collections::BTreeSet;

use log::{info, warn};

/// Outcome of [`ensure_admin`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// No bootstrap credentials configured
    Skipped,
    Created(uuid::Uuid),
    /// An account already owns the email. It is left untouched.
    AlreadyExists(uuid::Uuid),
}

/// Create the administrator account named in `config` unless an account
/// with that email exists.
pub async fn ensure_admin(
    state: &AppState,
    config: &BootstrapConfig,
) -> ServerErrorResult<BootstrapOutcome> {
    let Some((email, password)) = config.credentials() else {
        return Ok(BootstrapOutcome::Skipped);
    };
    let Some(email) = normalize_email(email) else {
        warn!("Bootstrap email is not usable, skipping administrator setup");
        return Ok(BootstrapOutcome::Skipped);
    };

    if let Some(existing) = state.store.find_account_by_email(&email).await? {
        return Ok(already_exists(&existing));
    }

    let digest = hash_blocking(state.hasher.clone(), password.to_string()).await?;
    let mut admin = Account::new_local(
        email.clone(),
        config.display_name.trim().to_string(),
        None,
        digest,
    );
    admin.roles = BTreeSet::from([ADMIN_ROLE.to_string()]);

    match state.store.insert_account(&admin).await {
        Ok(()) => {
            info!("Created bootstrap administrator {}", admin.id);
            Ok(BootstrapOutcome::Created(admin.id))
        }
        // Another instance won the insert
        Err(DbError::DuplicateEmail { .. }) => match state.store.find_account_by_email(&email).await? {
            Some(existing) => Ok(already_exists(&existing)),
            None => Ok(BootstrapOutcome::Skipped),
        },
        Err(e) => Err(e.into()),
    }
}

fn already_exists(account: &Account) -> BootstrapOutcome {
    warn!(
        "Bootstrap email already belongs to account {} (admin: {}); leaving it untouched",
        account.id,
        account.has_role(ADMIN_ROLE)
    );
    BootstrapOutcome::AlreadyExists(account.id)
}

//! Turns a [`LoginAttempt`] into the canonical [`Account`].
//!
//! External logins are find-or-create keyed on the primary email, followed
//! by a provider link upsert and a profile merge. Each round is retried as a
//! whole when storage reports a conflict (a stale version, a locked database,
//! a racing insert), up to `max_attempts` rounds.

use crate::password_hasher::hash_blocking;
use crate::{AuthError, PasswordHasher, ResolverConfig, Result as AuthErrorResult};

use bk_core::{Account, ExternalProfile, LocalRegistration, LoginAttempt, ProviderLink, normalize_email};
use bk_db::{FindOrInsert, IdentityStore, Result as DbErrorResult};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, info, warn};

pub struct IdentityResolver {
    store: Arc<dyn IdentityStore>,
    hasher: Arc<dyn PasswordHasher>,
    config: ResolverConfig,
}

impl IdentityResolver {
    pub fn new(
        store: Arc<dyn IdentityStore>,
        hasher: Arc<dyn PasswordHasher>,
        config: ResolverConfig,
    ) -> Self {
        Self {
            store,
            hasher,
            config,
        }
    }

    pub async fn resolve(&self, attempt: LoginAttempt) -> AuthErrorResult<Account> {
        match attempt {
            LoginAttempt::Local(registration) => self.register_local(registration).await,
            LoginAttempt::External(profile) => self.resolve_external(&profile).await,
        }
    }

    async fn resolve_external(&self, profile: &ExternalProfile) -> AuthErrorResult<Account> {
        let max_attempts = self.config.max_attempts.max(1);

        for attempt in 1..=max_attempts {
            match self.try_resolve_external(profile).await {
                Ok(account) => return Ok(account),
                Err(e) if e.is_conflict() => {
                    debug!(
                        "{} login for {} conflicted (attempt {}/{}): {}",
                        profile.provider, profile.provider_id, attempt, max_attempts, e
                    );
                }
                Err(e) => return Err(AuthError::from(e)),
            }
        }

        warn!(
            "{} login for {} gave up after {} conflicting attempts",
            profile.provider, profile.provider_id, max_attempts
        );
        Err(AuthError::ConcurrentModification {
            attempts: max_attempts,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// One find-or-create, link, merge round
    async fn try_resolve_external(&self, profile: &ExternalProfile) -> DbErrorResult<Account> {
        let account = match self.find_or_create(profile).await? {
            FindOrInsert::Inserted(account) => {
                info!(
                    "Created account {} from {} login",
                    account.id, profile.provider
                );
                return Ok(account);
            }
            FindOrInsert::Found(account) => account,
        };

        let link = self
            .store
            .upsert_provider_link(&ProviderLink::new(account.id, profile))
            .await?;

        let merged = merge_profile(account, profile, &link);
        self.store.update_account(&merged).await
    }

    /// A new account is stored together with its first link, so it is never
    /// visible without one.
    async fn find_or_create(&self, profile: &ExternalProfile) -> DbErrorResult<FindOrInsert> {
        if profile.primary_email().is_none()
            && let Some(account) = self
                .store
                .find_account_by_provider(profile.provider, &profile.provider_id)
                .await?
        {
            return Ok(FindOrInsert::Found(account));
        }

        let candidate = Account::new_external(profile);
        let link = ProviderLink::new(candidate.id, profile);
        self.store.find_or_create_with_link(&candidate, &link).await
    }

    async fn register_local(&self, registration: LocalRegistration) -> AuthErrorResult<Account> {
        let missing = registration.missing_fields();
        if !missing.is_empty() {
            return Err(AuthError::MissingFields {
                fields: missing.into_iter().map(str::to_string).collect(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let Some(email) = normalize_email(&registration.email) else {
            return Err(AuthError::MissingFields {
                fields: vec!["email".to_string()],
                location: ErrorLocation::from(Location::caller()),
            });
        };

        // Provider-only accounts count too: attaching a password to them
        // would hand the account to whoever registers first.
        if self.store.find_account_by_email(&email).await?.is_some() {
            return Err(AuthError::DuplicateEmail {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let digest = hash_blocking(Arc::clone(&self.hasher), registration.password).await?;
        let phone = registration
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        let account = Account::new_local(
            email,
            registration.display_name.trim().to_string(),
            phone,
            digest,
        );

        self.store.insert_account(&account).await?;
        info!("Registered local account {}", account.id);

        Ok(account)
    }
}

/// Apply an external login to an existing account
fn merge_profile(mut account: Account, profile: &ExternalProfile, link: &ProviderLink) -> Account {
    account.email_verified = true;
    if let Some(picture) = profile.picture.clone().or_else(|| link.picture.clone()) {
        account.picture = Some(picture);
    }
    if account.display_name.is_none() {
        account.display_name = profile.display_name.clone();
    }
    account.attach_link(link.id);
    account
}

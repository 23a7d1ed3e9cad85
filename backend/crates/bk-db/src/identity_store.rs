//! Storage seam used by the identity resolver.
//!
//! The resolver only ever talks to [`IdentityStore`]; the SQLite
//! implementation composes the two repositories over one pool. Every write
//! the resolver relies on for correctness under concurrency is a single
//! conditional statement:
//!
//! - `find_or_create_with_link` is `INSERT .. ON CONFLICT(email) DO NOTHING`
//!   followed by a read-back, so racing callers converge on one row. A new
//!   account and its first provider link commit in one transaction.
//! - `upsert_provider_link` is `INSERT .. ON CONFLICT(account_id, provider_name) DO UPDATE`.
//! - `update_account` is a compare-and-swap on `version`.

use crate::{AccountField, AccountRepository, DbError, ProviderLinkRepository, Result};

use bk_core::{Account, ErrorLocation, Provider, ProviderLink};

use std::panic::Location;

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

/// Outcome of [`IdentityStore::find_or_create_with_link`]
#[derive(Debug, Clone, PartialEq)]
pub enum FindOrInsert {
    /// Another account already owned the email
    Found(Account),
    /// The candidate was stored as given
    Inserted(Account),
}

impl FindOrInsert {
    pub fn account(&self) -> &Account {
        match self {
            Self::Found(account) | Self::Inserted(account) => account,
        }
    }

    pub fn into_account(self) -> Account {
        match self {
            Self::Found(account) | Self::Inserted(account) => account,
        }
    }

    pub fn was_inserted(&self) -> bool {
        matches!(self, Self::Inserted(_))
    }
}

#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_account_by_id(&self, id: Uuid) -> Result<Option<Account>>;

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>>;

    /// Account most recently linked to `(provider, provider_id)`
    async fn find_account_by_provider(
        &self,
        provider: Provider,
        provider_id: &str,
    ) -> Result<Option<Account>>;

    /// Plain insert. A taken email is [`DbError::DuplicateEmail`].
    async fn insert_account(&self, account: &Account) -> Result<()>;

    /// Return the account owning `candidate.email`, or insert `candidate`
    /// together with `link` when there is none. An account without email is
    /// always inserted. `link` must belong to `candidate`.
    async fn find_or_create_with_link(
        &self,
        candidate: &Account,
        link: &ProviderLink,
    ) -> Result<FindOrInsert>;

    /// Compare-and-swap on `account.version`. A stale version is [`DbError::Conflict`].
    async fn update_account(&self, account: &Account) -> Result<Account>;

    async fn upsert_provider_link(&self, link: &ProviderLink) -> Result<ProviderLink>;

    async fn find_provider_links(&self, account_id: Uuid) -> Result<Vec<ProviderLink>>;

    async fn field_value_exists(&self, field: AccountField, value: &str) -> Result<bool>;

    async fn ping(&self) -> Result<()>;
}

pub struct SqliteIdentityStore {
    pool: SqlitePool,
    accounts: AccountRepository,
    links: ProviderLinkRepository,
}

impl SqliteIdentityStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            accounts: AccountRepository::new(pool.clone()),
            links: ProviderLinkRepository::new(pool.clone()),
            pool,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl IdentityStore for SqliteIdentityStore {
    async fn find_account_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        self.accounts.find_by_id(id).await
    }

    async fn find_account_by_email(&self, email: &str) -> Result<Option<Account>> {
        self.accounts.find_by_email(email).await
    }

    async fn find_account_by_provider(
        &self,
        provider: Provider,
        provider_id: &str,
    ) -> Result<Option<Account>> {
        match self
            .links
            .find_account_id_by_provider_id(provider, provider_id)
            .await?
        {
            Some(account_id) => self.accounts.find_by_id(account_id).await,
            None => Ok(None),
        }
    }

    async fn insert_account(&self, account: &Account) -> Result<()> {
        self.accounts.create(account).await
    }

    async fn find_or_create_with_link(
        &self,
        candidate: &Account,
        link: &ProviderLink,
    ) -> Result<FindOrInsert> {
        if link.account_id != candidate.id {
            return Err(DbError::InvalidArgument {
                message: format!(
                    "Provider link belongs to {}, not {}",
                    link.account_id, candidate.id
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut tx = self.pool.begin().await?;
        if AccountRepository::create_unless_email_taken(&mut *tx, candidate).await? {
            ProviderLinkRepository::write(&mut *tx, link).await?;
            tx.commit().await?;

            let mut account = candidate.clone();
            account.attach_link(link.id);
            return Ok(FindOrInsert::Inserted(account));
        }
        tx.rollback().await?;

        let email = candidate.email.as_deref().unwrap_or_default();
        match self.accounts.find_by_email(email).await? {
            Some(existing) => Ok(FindOrInsert::Found(existing)),
            // The owner of the email disappeared between the two statements
            None => Err(DbError::Conflict {
                message: format!("Account for {} vanished during insert", email),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    async fn update_account(&self, account: &Account) -> Result<Account> {
        self.accounts.update(account).await
    }

    async fn upsert_provider_link(&self, link: &ProviderLink) -> Result<ProviderLink> {
        self.links.upsert(link).await
    }

    async fn find_provider_links(&self, account_id: Uuid) -> Result<Vec<ProviderLink>> {
        self.links.find_by_account(account_id).await
    }

    async fn field_value_exists(&self, field: AccountField, value: &str) -> Result<bool> {
        self.accounts.exists_by_field(field, value).await
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

//! Account repository.
//!
//! Accounts are never deleted here. Every mutation after creation goes
//! through [`AccountRepository::update`], which is a compare-and-swap on the
//! `version` column: a stale writer gets [`DbError::Conflict`] and is expected
//! to reload and retry.

use crate::{AccountField, DbError, Result as DbErrorResult};

use bk_core::{Account, ErrorLocation, normalize_email};

use std::collections::BTreeSet;
use std::panic::Location;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteQueryResult, SqliteRow};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const SELECT_ACCOUNT: &str = r#"
    SELECT id, email, display_name, password_digest, phone,
        email_verified, phone_verified, picture, roles, version,
        created_at, updated_at
    FROM accounts
"#;

const INSERT_ACCOUNT: &str = r#"
    INSERT INTO accounts (
        id, email, display_name, password_digest, phone,
        email_verified, phone_verified, picture, roles, version,
        created_at, updated_at
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
"#;

pub struct AccountRepository {
    pool: SqlitePool,
}

impl AccountRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new account. A taken email yields [`DbError::DuplicateEmail`].
    pub async fn create(&self, account: &Account) -> DbErrorResult<()> {
        let roles = encode_roles(&account.roles)?;
        let result = Self::insert(&self.pool, account, roles, INSERT_ACCOUNT).await;

        match result {
            Err(sqlx::Error::Database(db))
                if db.is_unique_violation() && db.message().contains("accounts.email") =>
            {
                Err(DbError::DuplicateEmail {
                    location: ErrorLocation::from(Location::caller()),
                })
            }
            Err(e) => Err(DbError::from(e)),
            Ok(_) => Ok(()),
        }
    }

    /// Insert `account` unless another account already owns its email.
    /// Returns `true` when the row was inserted.
    ///
    /// The check and the insert are one statement, so two racing callers
    /// can never both insert the same email.
    pub async fn create_if_email_absent(&self, account: &Account) -> DbErrorResult<bool> {
        if account.email.is_none() {
            return Err(DbError::InvalidArgument {
                message: "create_if_email_absent requires an email".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Self::create_unless_email_taken(&self.pool, account).await
    }

    /// [`Self::create_if_email_absent`] on any executor, so it can share a
    /// transaction. An account without email always inserts.
    pub async fn create_unless_email_taken<'e, E>(
        executor: E,
        account: &Account,
    ) -> DbErrorResult<bool>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let roles = encode_roles(&account.roles)?;
        let sql = format!("{} ON CONFLICT(email) DO NOTHING", INSERT_ACCOUNT.trim_end());
        let result = Self::insert(executor, account, roles, &sql).await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<Account>> {
        let sql = format!("{} WHERE id = ?", SELECT_ACCOUNT);

        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        self.hydrate(row).await
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<Account>> {
        let Some(email) = normalize_email(email) else {
            return Ok(None);
        };
        let sql = format!("{} WHERE email = ?", SELECT_ACCOUNT);

        let row = sqlx::query(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        self.hydrate(row).await
    }

    /// Persist the mutable fields of `account` if its version is still current.
    /// Returns the account as stored, with the bumped version.
    pub async fn update(&self, account: &Account) -> DbErrorResult<Account> {
        let now = Utc::now();
        let roles = encode_roles(&account.roles)?;

        let result = sqlx::query(
            r#"
                UPDATE accounts
                SET email = ?, display_name = ?, password_digest = ?, phone = ?,
                    email_verified = ?, phone_verified = ?, picture = ?, roles = ?,
                    version = version + 1, updated_at = ?
                WHERE id = ? AND version = ?
            "#,
        )
        .bind(&account.email)
        .bind(&account.display_name)
        .bind(&account.password_digest)
        .bind(&account.phone)
        .bind(account.email_verified)
        .bind(account.phone_verified)
        .bind(&account.picture)
        .bind(roles)
        .bind(now.timestamp())
        .bind(account.id.to_string())
        .bind(account.version)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts WHERE id = ?")
                .bind(account.id.to_string())
                .fetch_one(&self.pool)
                .await?;

            return Err(if exists == 0 {
                DbError::NotFound {
                    message: format!("Account {} not found", account.id),
                    location: ErrorLocation::from(Location::caller()),
                }
            } else {
                DbError::Conflict {
                    message: format!(
                        "Account {} changed since version {}",
                        account.id, account.version
                    ),
                    location: ErrorLocation::from(Location::caller()),
                }
            });
        }

        Ok(Account {
            version: account.version + 1,
            updated_at: now,
            ..account.clone()
        })
    }

    pub async fn exists_by_field(&self, field: AccountField, value: &str) -> DbErrorResult<bool> {
        let value = match field {
            AccountField::Email => match normalize_email(value) {
                Some(email) => email,
                None => return Ok(false),
            },
            _ => match value.trim() {
                "" => return Ok(false),
                trimmed => trimmed.to_string(),
            },
        };
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE {} = ?)",
            field.column()
        );

        let exists = sqlx::query_scalar::<_, bool>(&sql)
            .bind(value)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn insert<'e, E>(
        executor: E,
        account: &Account,
        roles: String,
        sql: &str,
    ) -> Result<SqliteQueryResult, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        sqlx::query(sql)
            .bind(account.id.to_string())
            .bind(account.email.clone())
            .bind(account.display_name.clone())
            .bind(account.password_digest.clone())
            .bind(account.phone.clone())
            .bind(account.email_verified)
            .bind(account.phone_verified)
            .bind(account.picture.clone())
            .bind(roles)
            .bind(account.version)
            .bind(account.created_at.timestamp())
            .bind(account.updated_at.timestamp())
            .execute(executor)
            .await
    }

    async fn hydrate(&self, row: Option<SqliteRow>) -> DbErrorResult<Option<Account>> {
        let Some(row) = row else {
            return Ok(None);
        };

        let id: String = row.try_get("id")?;
        let link_ids = sqlx::query_scalar::<_, String>(
            "SELECT id FROM provider_links WHERE account_id = ? ORDER BY created_at, id",
        )
        .bind(&id)
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(|link_id| {
            Uuid::parse_str(link_id)
                .map_err(|e| DbError::corrupt(format!("Invalid UUID in provider_links.id: {}", e)))
        })
        .collect::<DbErrorResult<Vec<_>>>()?;

        account_from_row(&row, link_ids).map(Some)
    }
}

fn encode_roles(roles: &BTreeSet<String>) -> DbErrorResult<String> {
    serde_json::to_string(roles)
        .map_err(|e| DbError::corrupt(format!("Unable to encode accounts.roles: {}", e)))
}

fn account_from_row(row: &SqliteRow, provider_links: Vec<Uuid>) -> DbErrorResult<Account> {
    let id: String = row.try_get("id")?;
    let roles: String = row.try_get("roles")?;
    let created_at: i64 = row.try_get("created_at")?;
    let updated_at: i64 = row.try_get("updated_at")?;

    Ok(Account {
        id: Uuid::parse_str(&id)
            .map_err(|e| DbError::corrupt(format!("Invalid UUID in accounts.id: {}", e)))?,
        email: row.try_get("email")?,
        display_name: row.try_get("display_name")?,
        password_digest: row.try_get("password_digest")?,
        phone: row.try_get("phone")?,
        email_verified: row.try_get("email_verified")?,
        phone_verified: row.try_get("phone_verified")?,
        picture: row.try_get("picture")?,
        roles: serde_json::from_str(&roles)
            .map_err(|e| DbError::corrupt(format!("Invalid JSON in accounts.roles: {}", e)))?,
        provider_links,
        version: row.try_get("version")?,
        created_at: timestamp(created_at, "accounts.created_at")?,
        updated_at: timestamp(updated_at, "accounts.updated_at")?,
    })
}

pub(crate) fn timestamp(secs: i64, column: &str) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| DbError::corrupt(format!("Invalid timestamp in {}", column)))
}

use crate::repositories::account_repository::timestamp;
use crate::{DbError, Result as DbErrorResult};

use bk_core::{ErrorLocation, Provider, ProviderLink};

use std::panic::Location;
use std::str::FromStr;

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const SELECT_LINK: &str = r#"
    SELECT id, account_id, provider_name, provider_id, picture, raw_payload,
        created_at, updated_at
    FROM provider_links
"#;

pub struct ProviderLinkRepository {
    pool: SqlitePool,
}

impl ProviderLinkRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert or refresh the link for (account_id, provider) in one statement.
    ///
    /// On conflict the provider id, payload and timestamp are overwritten and
    /// the picture is replaced only when the new link carries one. The stored
    /// row is returned, so the id is the original one on repeat logins.
    pub async fn upsert(&self, link: &ProviderLink) -> DbErrorResult<ProviderLink> {
        Self::write(&self.pool, link).await?;

        self.find_by_account_and_provider(link.account_id, link.provider)
            .await?
            .ok_or_else(|| DbError::NotFound {
                message: format!(
                    "Provider link {}/{} vanished after upsert",
                    link.account_id, link.provider
                ),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// The upsert statement alone, on any executor
    pub async fn write<'e, E>(executor: E, link: &ProviderLink) -> DbErrorResult<()>
    where
        E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
    {
        let raw_payload = serde_json::to_string(&link.raw_payload).map_err(|e| {
            DbError::InvalidArgument {
                message: format!("Unable to encode provider payload: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        sqlx::query(
            r#"
                INSERT INTO provider_links (
                    id, account_id, provider_name, provider_id, picture, raw_payload,
                    created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(account_id, provider_name) DO UPDATE SET
                    provider_id = excluded.provider_id,
                    picture = COALESCE(excluded.picture, provider_links.picture),
                    raw_payload = excluded.raw_payload,
                    updated_at = excluded.updated_at
            "#,
        )
        .bind(link.id.to_string())
        .bind(link.account_id.to_string())
        .bind(link.provider.as_str())
        .bind(link.provider_id.clone())
        .bind(link.picture.clone())
        .bind(raw_payload)
        .bind(link.created_at.timestamp())
        .bind(Utc::now().timestamp())
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn find_by_account_and_provider(
        &self,
        account_id: Uuid,
        provider: Provider,
    ) -> DbErrorResult<Option<ProviderLink>> {
        let sql = format!("{} WHERE account_id = ? AND provider_name = ?", SELECT_LINK);

        let row = sqlx::query(&sql)
            .bind(account_id.to_string())
            .bind(provider.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(link_from_row).transpose()
    }

    /// All links owned by an account, oldest first
    pub async fn find_by_account(&self, account_id: Uuid) -> DbErrorResult<Vec<ProviderLink>> {
        let sql = format!("{} WHERE account_id = ? ORDER BY created_at, id", SELECT_LINK);

        let rows = sqlx::query(&sql)
            .bind(account_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(link_from_row).collect()
    }

    /// Account most recently linked to the given provider identity
    pub async fn find_account_id_by_provider_id(
        &self,
        provider: Provider,
        provider_id: &str,
    ) -> DbErrorResult<Option<Uuid>> {
        let account_id = sqlx::query_scalar::<_, String>(
            r#"
                SELECT account_id
                FROM provider_links
                WHERE provider_name = ? AND provider_id = ?
                ORDER BY updated_at DESC
                LIMIT 1
            "#,
        )
        .bind(provider.as_str())
        .bind(provider_id)
        .fetch_optional(&self.pool)
        .await?;

        account_id
            .map(|id| {
                Uuid::parse_str(&id).map_err(|e| {
                    DbError::corrupt(format!("Invalid UUID in provider_links.account_id: {}", e))
                })
            })
            .transpose()
    }
}

fn link_from_row(row: &SqliteRow) -> DbErrorResult<ProviderLink> {
    let id: String = row.try_get("id")?;
    let account_id: String = row.try_get("account_id")?;
    let provider_name: String = row.try_get("provider_name")?;
    let raw_payload: String = row.try_get("raw_payload")?;
    let created_at: i64 = row.try_get("created_at")?;
    let updated_at: i64 = row.try_get("updated_at")?;

    Ok(ProviderLink {
        id: Uuid::parse_str(&id)
            .map_err(|e| DbError::corrupt(format!("Invalid UUID in provider_links.id: {}", e)))?,
        account_id: Uuid::parse_str(&account_id).map_err(|e| {
            DbError::corrupt(format!("Invalid UUID in provider_links.account_id: {}", e))
        })?,
        provider: Provider::from_str(&provider_name).map_err(|e| {
            DbError::corrupt(format!("Invalid provider in provider_links.provider_name: {}", e))
        })?,
        provider_id: row.try_get("provider_id")?,
        picture: row.try_get("picture")?,
        raw_payload: serde_json::from_str(&raw_payload).map_err(|e| {
            DbError::corrupt(format!("Invalid JSON in provider_links.raw_payload: {}", e))
        })?,
        created_at: timestamp(created_at, "provider_links.created_at")?,
        updated_at: timestamp(updated_at, "provider_links.updated_at")?,
    })
}

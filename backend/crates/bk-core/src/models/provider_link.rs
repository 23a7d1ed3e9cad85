use crate::{ExternalProfile, Provider};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Binding between an account and one external provider.
/// At most one link exists per (account_id, provider).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderLink {
    pub id: Uuid,
    pub account_id: Uuid,
    pub provider: Provider,
    /// User id as reported by the provider
    pub provider_id: String,
    pub picture: Option<String>,
    pub raw_payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProviderLink {
    /// Build the link for `profile` owned by `account_id`
    pub fn new(account_id: Uuid, profile: &ExternalProfile) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            account_id,
            provider: profile.provider,
            provider_id: profile.provider_id.clone(),
            picture: profile.picture.clone(),
            raw_payload: profile.raw_payload.clone(),
            created_at: now,
            updated_at: now,
        }
    }
}

//! Account entity - the canonical identity every login resolves to.

use crate::{ExternalProfile, normalize_email};

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role granted to every newly created account
pub const DEFAULT_ROLE: &str = "cliente";

/// Role granted to the bootstrap administrator
pub const ADMIN_ROLE: &str = "sys_admin";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    /// Unique across accounts when present
    pub email: Option<String>,
    pub display_name: Option<String>,
    /// PHC-formatted password digest, only for accounts registered locally
    #[serde(skip_serializing, default)]
    pub password_digest: Option<String>,
    pub phone: Option<String>,
    pub email_verified: bool,
    pub phone_verified: bool,
    pub picture: Option<String>,
    pub roles: BTreeSet<String>,
    /// Ids of the provider links owned by this account
    pub provider_links: Vec<Uuid>,
    /// Optimistic locking version
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    fn blank(email: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name: None,
            password_digest: None,
            phone: None,
            email_verified: false,
            phone_verified: false,
            picture: None,
            roles: BTreeSet::from([DEFAULT_ROLE.to_string()]),
            provider_links: Vec::new(),
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create an account for a local registration. The email is expected
    /// to be normalized already.
    pub fn new_local(
        email: String,
        display_name: String,
        phone: Option<String>,
        password_digest: String,
    ) -> Self {
        Self {
            display_name: Some(display_name),
            phone,
            password_digest: Some(password_digest),
            ..Self::blank(Some(email))
        }
    }

    /// Create the account candidate for a first social login.
    ///
    /// The email counts as verified because a provider link is created
    /// together with the account.
    pub fn new_external(profile: &ExternalProfile) -> Self {
        Self {
            display_name: profile.display_name.clone(),
            picture: profile.picture.clone(),
            email_verified: true,
            ..Self::blank(profile.primary_email().and_then(normalize_email))
        }
    }

    pub fn has_password(&self) -> bool {
        self.password_digest.is_some()
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    /// Add a provider link id to the link set. Returns `false` when the
    /// link was already attached.
    pub fn attach_link(&mut self, link_id: Uuid) -> bool {
        if self.provider_links.contains(&link_id) {
            return false;
        }
        self.provider_links.push(link_id);
        true
    }

    pub fn roles_vec(&self) -> Vec<String> {
        self.roles.iter().cloned().collect()
    }
}

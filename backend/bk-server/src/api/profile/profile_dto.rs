use bk_core::{Account, ProviderLink};

use serde::Serialize;

/// Public view of an account. The password digest is never part of it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDto {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
    pub roles: Vec<String>,
    pub celular: Option<String>,
    pub email_verified: bool,
    pub wapp_verified: bool,
    /// Linked provider names, oldest link first
    pub providers: Vec<String>,
}

impl ProfileDto {
    /// `links` must be ordered oldest first. The first link's picture
    /// stands in when the account has none.
    pub fn new(account: Account, links: &[ProviderLink]) -> Self {
        let picture = account
            .picture
            .clone()
            .or_else(|| links.first().and_then(|link| link.picture.clone()));

        Self {
            id: account.id.to_string(),
            roles: account.roles_vec(),
            display_name: account.display_name,
            email: account.email,
            picture,
            celular: account.phone,
            email_verified: account.email_verified,
            wapp_verified: account.phone_verified,
            providers: links
                .iter()
                .map(|link| link.provider.as_str().to_string())
                .collect(),
        }
    }
}

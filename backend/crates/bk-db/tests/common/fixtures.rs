use bk_core::{Account, ExternalProfile, Provider, ProviderLink};

use serde_json::json;
use uuid::Uuid;

/// Local account with a placeholder digest
pub fn create_test_local_account(email: &str) -> Account {
    Account::new_local(
        email.to_string(),
        "Test User".to_string(),
        Some("5551234".to_string()),
        "$argon2id$v=19$m=1024,t=1,p=1$c2FsdHNhbHQ$aGFzaA".to_string(),
    )
}

pub fn create_test_profile(provider: Provider, provider_id: &str, email: Option<&str>) -> ExternalProfile {
    ExternalProfile {
        provider,
        provider_id: provider_id.to_string(),
        emails: email.map(|e| vec![e.to_string()]).unwrap_or_default(),
        display_name: Some("Social User".to_string()),
        picture: Some(format!("http://pic/{}", provider_id)),
        raw_payload: json!({ "id": provider_id }),
    }
}

pub fn create_test_link(account_id: Uuid, provider: Provider, provider_id: &str) -> ProviderLink {
    ProviderLink::new(
        account_id,
        &create_test_profile(provider, provider_id, None),
    )
}

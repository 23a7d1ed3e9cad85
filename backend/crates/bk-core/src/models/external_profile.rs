//! Provider-neutral view of a social login.

use crate::Provider;

use serde::{Deserialize, Serialize};

/// A provider callback profile after normalization.
///
/// `emails` are already normalized (trimmed, lower-cased, de-duplicated);
/// the first one is the join key against existing accounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalProfile {
    pub provider: Provider,
    pub provider_id: String,
    pub emails: Vec<String>,
    pub display_name: Option<String>,
    pub picture: Option<String>,
    /// Untouched provider payload, stored on the provider link
    pub raw_payload: serde_json::Value,
}

impl ExternalProfile {
    pub fn primary_email(&self) -> Option<&str> {
        self.emails.first().map(String::as_str)
    }
}

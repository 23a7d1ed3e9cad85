//! Maps raw provider user-info payloads onto [`ExternalProfile`].
//!
//! Pure functions: no network, no storage. The OAuth handshake happens
//! elsewhere; this module only sees the JSON it produced.

use crate::{AuthError, Result as AuthErrorResult};

use bk_core::{ExternalProfile, Provider, normalize_email};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// Only the user id is required. Fields read leniently: an unexpected JSON
// type becomes `None` instead of failing the whole profile.

/// Google OpenID `userinfo` or the older v2 shape
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GoogleUserInfo {
    #[serde(deserialize_with = "lenient_id")]
    sub: Option<String>,
    #[serde(deserialize_with = "lenient_id")]
    id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    given_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    family_name: Option<String>,
    #[serde(deserialize_with = "lenient_picture")]
    picture: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    email: Option<String>,
    #[serde(deserialize_with = "lenient_bool")]
    email_verified: Option<bool>,
    #[serde(deserialize_with = "lenient_bool")]
    verified_email: Option<bool>,
    #[serde(deserialize_with = "lenient_emails")]
    emails: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FacebookUserInfo {
    #[serde(deserialize_with = "lenient_id")]
    id: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    first_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    last_name: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    email: Option<String>,
    #[serde(deserialize_with = "lenient_emails")]
    emails: Vec<String>,
    /// Graph API nests it as `{ "data": { "url": .. } }`
    #[serde(deserialize_with = "lenient_picture")]
    picture: Option<String>,
}

/// Normalize the payload of `provider_name`
#[track_caller]
pub fn normalize(provider_name: &str, raw_profile: &Value) -> AuthErrorResult<ExternalProfile> {
    let provider =
        Provider::from_str(provider_name).map_err(|_| AuthError::UnsupportedProvider {
            provider: provider_name.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    match provider {
        Provider::Google => normalize_google(raw_profile),
        Provider::Facebook => normalize_facebook(raw_profile),
    }
}

#[track_caller]
fn normalize_google(raw_profile: &Value) -> AuthErrorResult<ExternalProfile> {
    let info: GoogleUserInfo = parse(raw_profile)?;

    let provider_id = required_id(info.sub.or(info.id))?;
    let display_name = non_blank(info.name).or_else(|| join_names(info.given_name, info.family_name));
    let unverified = info.email_verified == Some(false) || info.verified_email == Some(false);
    let emails = if unverified {
        Vec::new()
    } else {
        collect_emails(info.email, info.emails)
    };

    Ok(ExternalProfile {
        provider: Provider::Google,
        provider_id,
        emails,
        display_name,
        picture: non_blank(info.picture),
        raw_payload: raw_profile.clone(),
    })
}

#[track_caller]
fn normalize_facebook(raw_profile: &Value) -> AuthErrorResult<ExternalProfile> {
    let info: FacebookUserInfo = parse(raw_profile)?;

    let provider_id = required_id(info.id)?;
    let display_name = join_names(info.first_name, info.last_name).or_else(|| non_blank(info.name));
    let picture = non_blank(info.picture);

    Ok(ExternalProfile {
        provider: Provider::Facebook,
        provider_id,
        emails: collect_emails(info.email, info.emails),
        display_name,
        picture,
        raw_payload: raw_profile.clone(),
    })
}

#[track_caller]
fn parse<T: DeserializeOwned>(raw_profile: &Value) -> AuthErrorResult<T> {
    if !raw_profile.is_object() {
        return Err(AuthError::MalformedProviderProfile {
            message: "profile must be a JSON object".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    T::deserialize(raw_profile).map_err(|e| AuthError::MalformedProviderProfile {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}

#[track_caller]
fn required_id(id: Option<String>) -> AuthErrorResult<String> {
    non_blank(id).ok_or_else(|| AuthError::MalformedProviderProfile {
        message: "missing provider user id".to_string(),
        location: ErrorLocation::from(Location::caller()),
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn join_names(first: Option<String>, last: Option<String>) -> Option<String> {
    let joined = [non_blank(first), non_blank(last)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    non_blank(Some(joined))
}

/// `email` first, then any listed entries; normalized and de-duplicated
fn collect_emails(email: Option<String>, listed: Vec<String>) -> Vec<String> {
    let mut emails: Vec<String> = Vec::new();
    let candidates = email.into_iter().chain(listed);
    for normalized in candidates.filter_map(|e| normalize_email(&e)) {
        if !emails.contains(&normalized) {
            emails.push(normalized);
        }
    }
    emails
}

/// String as-is, numbers in their decimal form
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// `true` / `false`, also as strings
fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => Some(b),
        Value::String(s) => s.trim().to_ascii_lowercase().parse().ok(),
        _ => None,
    })
}

/// A URL string or `{ "data": { "url": .. } }`
fn lenient_picture<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Object(map) => map
            .get("data")
            .and_then(|data| data.get("url"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    })
}

/// Passport-style `[{ "value": .. }]` or plain strings; anything else is skipped
fn lenient_emails<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(entries) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::String(s) => Some(s),
            Value::Object(mut map) => match map.remove("value") {
                Some(Value::String(s)) => Some(s),
                _ => None,
            },
            _ => None,
        })
        .collect())
}

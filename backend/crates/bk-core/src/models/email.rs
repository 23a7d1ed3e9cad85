/// Canonical form of an email used as the cross-provider join key.
///
/// Returns `None` for blank input so callers never persist an empty email
/// (which would collide under the unique index).
pub fn normalize_email(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

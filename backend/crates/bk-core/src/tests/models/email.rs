use crate::normalize_email;

#[test]
fn test_normalize_email_trims_and_lowercases() {
    assert_eq!(
        normalize_email("  Ana@Example.COM ").as_deref(),
        Some("ana@example.com")
    );
}

#[test]
fn test_normalize_email_blank_is_none() {
    assert_eq!(normalize_email("   "), None);
    assert_eq!(normalize_email(""), None);
}

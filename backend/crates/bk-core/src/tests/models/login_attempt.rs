use crate::LocalRegistration;

fn registration(email: &str, password: &str, display_name: &str) -> LocalRegistration {
    LocalRegistration {
        email: email.to_string(),
        password: password.to_string(),
        display_name: display_name.to_string(),
        phone: None,
    }
}

#[test]
fn test_complete_registration_has_no_missing_fields() {
    assert!(registration("a@x.com", "p", "A").missing_fields().is_empty());
}

#[test]
fn test_missing_fields_lists_every_blank_field() {
    let missing = registration("", "", " ").missing_fields();
    assert_eq!(missing, vec!["email", "password", "displayName"]);
}

#[test]
fn test_email_without_at_sign_is_missing() {
    assert_eq!(registration("nope", "p", "A").missing_fields(), vec!["email"]);
}

#[test]
fn test_debug_output_redacts_password() {
    let rendered = format!("{:?}", registration("a@x.com", "hunter2", "A"));
    assert!(!rendered.contains("hunter2"));
    assert!(rendered.contains("<redacted>"));
}

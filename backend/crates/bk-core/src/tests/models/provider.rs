use crate::{CoreError, Provider};

use std::str::FromStr;

#[test]
fn test_provider_as_str() {
    assert_eq!(Provider::Google.as_str(), "google");
    assert_eq!(Provider::Facebook.as_str(), "facebook");
}

#[test]
fn test_provider_from_str() {
    assert_eq!(Provider::from_str("google").unwrap(), Provider::Google);
    assert_eq!(Provider::from_str("facebook").unwrap(), Provider::Facebook);
    assert!(matches!(
        Provider::from_str("local"),
        Err(CoreError::InvalidProvider { .. })
    ));
}

#[test]
fn test_provider_from_str_is_case_sensitive() {
    assert!(Provider::from_str("Google").is_err());
}

pub mod error;
pub mod models;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::account::{Account, ADMIN_ROLE, DEFAULT_ROLE};
pub use models::email::normalize_email;
pub use models::external_profile::ExternalProfile;
pub use models::login_attempt::{LocalRegistration, LoginAttempt};
pub use models::provider::Provider;
pub use models::provider_link::ProviderLink;

#[cfg(test)]
mod tests;

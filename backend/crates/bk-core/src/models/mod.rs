pub mod account;
pub mod email;
pub mod external_profile;
pub mod login_attempt;
pub mod provider;
pub mod provider_link;

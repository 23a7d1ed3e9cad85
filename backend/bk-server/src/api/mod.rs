pub mod auth;
pub mod callback;
pub mod check;
pub mod error;
pub mod extractors;
pub mod profile;

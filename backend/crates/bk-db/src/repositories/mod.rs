pub mod account_repository;
pub mod provider_link_repository;

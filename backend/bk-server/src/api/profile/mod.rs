#[allow(clippy::module_inception)]
pub mod profile;
pub mod profile_dto;

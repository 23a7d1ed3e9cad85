#[allow(clippy::module_inception)]
pub mod check;
pub mod check_query;
pub mod check_response;

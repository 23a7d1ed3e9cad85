#[allow(clippy::module_inception)]
pub mod callback;
pub mod callback_redirect;

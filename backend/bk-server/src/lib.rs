pub mod api;
pub mod app_state;
pub mod bootstrap;
pub mod error;
pub mod health;
pub mod logger;
pub mod metrics;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    auth::{
        auth::{login, refresh, register},
        login_request::LoginRequest,
        refresh_request::RefreshRequest,
        register_request::RegisterRequest,
    },
    callback::{
        callback::provider_callback,
        callback_redirect::{failure_redirect_url, login_redirect_url},
    },
    check::{check::check_field, check_query::CheckQuery, check_response::CheckResponse},
    error::{ApiError, ApiErrorBody, ApiErrorResponse, Result as ApiResult},
    extractors::bearer_account::BearerAccount,
    profile::{profile::get_profile, profile_dto::ProfileDto},
};
pub use app_state::{AppState, ServiceSettings};
pub use bootstrap::{BootstrapOutcome, ensure_admin};
pub use error::{Result as ServerResult, ServerError};
pub use metrics::Metrics;

pub use crate::routes::build_router;

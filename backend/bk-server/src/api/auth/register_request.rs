use bk_core::LocalRegistration;

use serde::Deserialize;

/// Absent fields deserialize as blank so the resolver can name them all
#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: String,
    /// Mobile phone number
    pub celular: Option<String>,
}

impl From<RegisterRequest> for LocalRegistration {
    fn from(request: RegisterRequest) -> Self {
        Self {
            email: request.email,
            password: request.password,
            display_name: request.display_name,
            phone: request.celular.filter(|phone| !phone.trim().is_empty()),
        }
    }
}

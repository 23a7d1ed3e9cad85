use crate::ExternalProfile;

/// One authentication request entering the identity resolver.
#[derive(Debug, Clone)]
pub enum LoginAttempt {
    /// Local registration with email and password
    Local(LocalRegistration),
    /// Social login after provider normalization
    External(ExternalProfile),
}

#[derive(Clone)]
pub struct LocalRegistration {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub phone: Option<String>,
}

impl LocalRegistration {
    /// Names of the required fields that are blank, in wire naming.
    /// An email without `@` counts as missing.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.email.contains('@') || self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.password.is_empty() {
            missing.push("password");
        }
        if self.display_name.trim().is_empty() {
            missing.push("displayName");
        }
        missing
    }
}

impl std::fmt::Debug for LocalRegistration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalRegistration")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .field("phone", &self.phone)
            .finish()
    }
}

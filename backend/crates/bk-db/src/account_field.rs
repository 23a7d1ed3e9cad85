use crate::DbError;

use bk_core::ErrorLocation;

use std::panic::Location;
use std::str::FromStr;

/// Account attributes that can be probed for existence (client-side uniqueness checks).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountField {
    Email,
    Phone,
    DisplayName,
}

impl AccountField {
    /// Column backing this field. Only these fixed names ever reach SQL.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::DisplayName => "display_name",
        }
    }
}

impl FromStr for AccountField {
    type Err = DbError;

    /// Accepts the wire names used by the registration form.
    #[track_caller]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "celular" => Ok(Self::Phone),
            "displayName" => Ok(Self::DisplayName),
            _ => Err(DbError::InvalidArgument {
                message: format!("Unknown account field: {}", s),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

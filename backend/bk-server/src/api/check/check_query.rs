use serde::Deserialize;

/// `?fld=<field>&data=<value>`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CheckQuery {
    pub fld: Option<String>,
    pub data: Option<String>,
}

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CheckResponse {
    pub exists: bool,
}

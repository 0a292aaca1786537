use serde::{Deserialize, Serialize};

/// Missing fields are left for the service to reject, so that absent and
/// empty credentials fail the same way.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

use common::validation::{Presence, Schema};
use serde::{Deserialize, Serialize};

/// User body as sent by clients for create and update.
/// Every field is optional so that shape checks happen in the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPayload {
    pub user_id: Option<i32>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(alias = "firstName")]
    pub first_name: Option<String>,
    #[serde(alias = "lastName")]
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<i32>,
}

impl Schema for UserPayload {
    const FIELDS: &'static [&'static str] = &[
        "user_id",
        "username",
        "password",
        "first_name",
        "last_name",
        "email",
        "role_id",
    ];

    fn presence(&self) -> Vec<(&'static str, bool)> {
        vec![
            ("user_id", self.user_id.is_present()),
            ("username", self.username.is_present()),
            ("password", self.password.is_present()),
            ("first_name", self.first_name.is_present()),
            ("last_name", self.last_name.is_present()),
            ("email", self.email.is_present()),
            ("role_id", self.role_id.is_present()),
        ]
    }
}

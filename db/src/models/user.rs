use common::validation::{Presence, Schema};
use serde::{Deserialize, Serialize};

/// Row of the `users` table. Carries the password hash and therefore never
/// leaves the service layer as-is.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct User {
    pub user_id: i32,
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_id: i32,
}

impl Schema for User {
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

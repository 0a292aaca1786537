use serde::{Deserialize, Serialize};

/// Session key the principal is stored under.
pub const PRINCIPAL_SESSION_KEY: &str = "principal";

/// Authenticated identity attached to the session after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: i32,
    pub username: String,
    pub role_id: i32,
}

impl Principal {
    pub fn role(&self) -> Option<Role> {
        Role::from_id(self.role_id)
    }

    /// Whether this principal may access a route requiring `required`.
    pub fn has_role(&self, required: Role) -> bool {
        self.role().is_some_and(|role| role.satisfies(required))
    }
}

/// Roles as stored in `users.role_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    pub fn from_id(role_id: i32) -> Option<Self> {
        match role_id {
            1 => Some(Role::Admin),
            2 => Some(Role::Manager),
            3 => Some(Role::Employee),
            _ => None,
        }
    }

    pub fn id(self) -> i32 {
        match self {
            Role::Admin => 1,
            Role::Manager => 2,
            Role::Employee => 3,
        }
    }

    // lower id means more privilege
    pub fn satisfies(self, required: Role) -> bool {
        self.id() <= required.id()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Employee => "employee",
        }
    }
}

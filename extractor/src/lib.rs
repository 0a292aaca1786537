use common::principal::Role;
use middleware::{extractor::ExtractionMiddleware, guard::RoleGuard};

pub mod middleware {
    pub mod extractor;
    pub mod guard;
}

/// Copies the session principal into request extensions.
pub fn middleware() -> ExtractionMiddleware {
    ExtractionMiddleware::new()
}

pub fn admin_guard() -> RoleGuard {
    RoleGuard::new(Role::Admin)
}

pub fn manager_guard() -> RoleGuard {
    RoleGuard::new(Role::Manager)
}

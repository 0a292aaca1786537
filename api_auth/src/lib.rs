use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{
    cookie::{Key, SameSite},
    web,
};

pub mod routes {
    pub mod auth;
}

mod dtos {
    pub(crate) mod auth;
}

pub fn mount_auth() -> actix_web::Scope {
    web::scope("/auth")
        .service(routes::auth::get_logout)
        .service(routes::auth::post_login)
}

/// Cookie-backed sessions. The cookie is signed and encrypted with a key
/// derived from `secret`; cross-site in production so the separately hosted
/// frontend can send it.
pub fn session_middleware(
    cookie_secure: bool,
    is_production: bool,
    secret: &[u8],
) -> SessionMiddleware<CookieSessionStore> {
    let same_site = if is_production {
        SameSite::None
    } else {
        SameSite::Lax
    };
    SessionMiddleware::builder(CookieSessionStore::default(), Key::derive_from(secret))
        .cookie_name("ers_session".to_string())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_same_site(same_site)
        .build()
}

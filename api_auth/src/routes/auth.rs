use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use api_users::services::user::UserService;
use common::error::{AppError, Res};
use common::http::Success;
use common::principal::{PRINCIPAL_SESSION_KEY, Principal};

use crate::dtos::auth::LoginRequest;

/// Logs out by removing the principal from the session.
///
/// # Output
/// - Always 202 with an empty body
#[get("")]
pub async fn get_logout(session: Session) -> impl Responder {
    session.remove(PRINCIPAL_SESSION_KEY);
    HttpResponse::Accepted().finish()
}

/// Authenticates a user with username and password.
///
/// # Input
/// - `login_data`: JSON payload containing username and password
///
/// # Output
/// - Success: 200 with the principal `{user_id, username, role_id}`, which
///   is also stored in the session cookie
/// - Error: 400 for missing credentials or a wrong password,
///   401 for an unknown username
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/auth', {
///   method: 'POST',
///   credentials: 'include', // keeps the session cookie
///   headers: { 'Content-Type': 'application/json' },
///   body: JSON.stringify({ username: 'admin', password: 'password' })
/// });
///
/// if (response.ok) {
///   const principal = await response.json();
///   console.log('Logged in as', principal.username, 'role', principal.role_id);
/// }
/// ```
#[post("")]
pub async fn post_login(
    login_data: web::Json<LoginRequest>,
    service: web::Data<UserService>,
    session: Session,
) -> Res<impl Responder> {
    let login_data = login_data.into_inner();
    let user = service
        .authentication(login_data.username.as_deref(), login_data.password.as_deref())
        .await?;

    let principal = Principal {
        user_id: user.user_id,
        username: user.username,
        role_id: user.role_id,
    };

    session.renew();
    session
        .insert(PRINCIPAL_SESSION_KEY, &principal)
        .map_err(|_| AppError::Internal("Failed to store session principal".to_string()))?;
    log::info!("User {} logged in", principal.user_id);

    Success::ok(principal)
}

use actix_web::{Responder, delete, get, post, put, web};
use common::{error::Res, http::Success};
use db::dtos::user::UserPayload;

use crate::services::user::UserService;

/// Lists every user without passwords.
///
/// # Output
/// - Success: 200 with an array of users
/// - Error: 404 when there are no users
#[get("")]
pub async fn get_users(service: web::Data<UserService>) -> Res<impl Responder> {
    let users = service.get_all_users().await?;
    Success::ok(users)
}

/// Retrieves one user.
///
/// # Output
/// - Success: 200 with the user
/// - Error: 400 for a malformed id, 404 when it does not exist
#[get("/{id}")]
pub async fn get_user(
    path: web::Path<String>,
    service: web::Data<UserService>,
) -> Res<impl Responder> {
    let user = service.get_user_by_id(&path).await?;
    Success::ok(user)
}

/// Creates a user. Admin only.
///
/// # Frontend Example
/// ```javascript
/// const response = await fetch('/users', {
///   method: 'POST',
///   credentials: 'include',
///   headers: { 'Content-Type': 'application/json' },
///   body: JSON.stringify({
///     username: 'khkeipe',
///     password: 'password',
///     first_name: 'Korey',
///     last_name: 'Keipe',
///     email: 'kkeipe@example.com',
///     role_id: 3
///   })
/// });
/// // 201 with the stored user, 409 if username or email is taken
/// ```
#[post("", wrap = "extractor::admin_guard()")]
pub async fn post_user(
    req: web::Json<UserPayload>,
    service: web::Data<UserService>,
) -> Res<impl Responder> {
    let user = service.save_user(req.into_inner()).await?;
    Success::created(user)
}

/// Replaces a user. Admin only; the body must be a full user record.
#[put("", wrap = "extractor::admin_guard()")]
pub async fn put_user(
    req: web::Json<UserPayload>,
    service: web::Data<UserService>,
) -> Res<impl Responder> {
    let updated = service.update_user(req.into_inner()).await?;
    Success::accepted(updated)
}

#[delete("/{id}", wrap = "extractor::admin_guard()")]
pub async fn delete_user(
    path: web::Path<String>,
    service: web::Data<UserService>,
) -> Res<impl Responder> {
    let deleted = service.delete_user_by_id(&path).await?;
    Success::accepted(deleted)
}

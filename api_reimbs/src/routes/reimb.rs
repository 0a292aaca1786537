use actix_web::{Responder, delete, get, post, put, web};
use common::{error::Res, http::Success};
use db::dtos::reimb::ReimbPayload;

use crate::services::reimb::ReimbService;

#[get("")]
pub async fn get_reimbs(service: web::Data<ReimbService>) -> Res<impl Responder> {
    let reimbs = service.get_all_reimbs().await?;
    Success::ok(reimbs)
}

#[get("/{id}")]
pub async fn get_reimb(
    path: web::Path<String>,
    service: web::Data<ReimbService>,
) -> Res<impl Responder> {
    let reimb = service.get_reimb_by_id(&path).await?;
    Success::ok(reimb)
}

/// Submits a reimbursement.
///
/// # Input
/// - `amount`, `description`, `author_id`, `status_id`, `type_id`
///
/// # Output
/// - Success: 201 with the stored reimbursement, `submitted` filled in
/// - Error: 400 when a required field is missing
#[post("")]
pub async fn post_reimb(
    req: web::Json<ReimbPayload>,
    service: web::Data<ReimbService>,
) -> Res<impl Responder> {
    let reimb = service.save_reimb(req.into_inner()).await?;
    Success::created(reimb)
}

/// Updates amount, description, resolver, status and type. Admin only.
#[put("", wrap = "extractor::admin_guard()")]
pub async fn put_reimb(
    req: web::Json<ReimbPayload>,
    service: web::Data<ReimbService>,
) -> Res<impl Responder> {
    let updated = service.update_reimb(req.into_inner()).await?;
    Success::accepted(updated)
}

#[delete("/{id}", wrap = "extractor::admin_guard()")]
pub async fn delete_reimb(
    path: web::Path<String>,
    service: web::Data<ReimbService>,
) -> Res<impl Responder> {
    let deleted = service.delete_reimb_by_id(&path).await?;
    Success::accepted(deleted)
}

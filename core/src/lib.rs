use actix_web::{HttpResponse, Responder, get, web};

pub mod cors;

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain")
        .body("Expense Reimbursement System API")
}

/// Every route the server exposes. Services and session middleware are
/// attached by the caller.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(common::http::json_config())
        .service(index)
        .service(api_auth::mount_auth())
        .service(api_users::mount_users())
        .service(api_reimbs::mount_reimbs());
}

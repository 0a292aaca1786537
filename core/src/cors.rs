use actix_cors::Cors;
use actix_web::http::header;

/// Single-origin CORS with credentials, so the browser sends the session cookie.
pub fn middleware(origin: &str) -> Cors {
    Cors::default()
        .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT])
        .allowed_origin(origin)
        .supports_credentials()
        .max_age(3600)
}

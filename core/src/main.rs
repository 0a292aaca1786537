use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use api_reimbs::services::reimb::ReimbService;
use api_users::services::user::UserService;
use common::env_config::Config;
use db::{reimb::PgReimbRepository, user::PgUserRepository};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // get env vars
    let config = Config::from_env();

    // get info
    let is_production = config.is_production();
    let origin = config.cors_allowed_origin.clone();
    let cookie_secure = !origin.contains("localhost");

    // init logger
    if config.console_logging_enabled {
        logger::setup(config.log_file.as_deref()).expect("Failed to set up logger");
    }

    // init db connection
    let pool = db::setup(&config.database_url, is_production, config.db_pool_size)
        .await
        .expect("Failed to set up database");

    let user_service = web::Data::new(UserService::new(Arc::new(PgUserRepository::new(
        pool.clone(),
    ))));
    let reimb_service = web::Data::new(ReimbService::new(Arc::new(PgReimbRepository::new(
        pool.clone(),
    ))));

    log::info!(
        "Listening on {}:{} ({})",
        config.server_host,
        config.server_port,
        config.environment
    );

    let secret = config.session_secret.clone();
    HttpServer::new(move || {
        App::new()
            .app_data(user_service.clone())
            .app_data(reimb_service.clone())
            .wrap(logger::middleware()) // 4th
            .wrap(extractor::middleware()) // 3rd
            .wrap(server::cors::middleware(&origin)) // 2nd
            .wrap(api_auth::session_middleware(
                cookie_secure,
                is_production,
                secret.as_bytes(),
            )) // 1st
            .configure(server::routes)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .workers(config.num_workers)
    .run()
    .await
}

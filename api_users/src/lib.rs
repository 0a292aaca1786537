use actix_web::web;

pub mod routes {
    pub mod user;
}

pub mod services {
    pub mod user;
}

pub mod dtos {
    pub mod user;
}

pub fn mount_users() -> actix_web::Scope {
    web::scope("/users")
        .service(routes::user::get_users)
        .service(routes::user::get_user)
        .service(routes::user::post_user)
        .service(routes::user::put_user)
        .service(routes::user::delete_user)
}

use actix_web::web;

pub mod routes {
    pub mod reimb;
}

pub mod services {
    pub mod reimb;
}

pub fn mount_reimbs() -> actix_web::Scope {
    web::scope("/reimbursements")
        .service(routes::reimb::get_reimbs)
        .service(routes::reimb::get_reimb)
        .service(routes::reimb::post_reimb)
        .service(routes::reimb::put_reimb)
        .service(routes::reimb::delete_reimb)
}

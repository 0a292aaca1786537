use actix_web::{
    Error, HttpMessage,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use common::{
    error::AppError,
    principal::{Principal, Role},
};
use std::{future::Future, pin::Pin, rc::Rc};

/// Rejects requests whose principal does not hold at least `required`.
/// No principal at all is 401, a lesser role is 403.
pub struct RoleGuard {
    required: Role,
}

impl RoleGuard {
    pub fn new(required: Role) -> Self {
        Self { required }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RoleGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Transform = RoleGuardService<S>;
    type InitError = ();
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(RoleGuardService {
            service: Rc::new(service),
            required: self.required,
        }))
    }
}

pub struct RoleGuardService<S> {
    service: Rc<S>,
    required: Role,
}

impl<S, B> Service<ServiceRequest> for RoleGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: actix_web::body::MessageBody + 'static,
{
    type Response = ServiceResponse<actix_web::body::BoxBody>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let principal = req.extensions().get::<Principal>().cloned();
        let required = self.required;
        let srv = Rc::clone(&self.service);

        Box::pin(async move {
            match principal {
                None => Ok(req.error_response(AppError::Authentication(
                    "You must be logged in".to_string(),
                ))),
                Some(principal) if !principal.has_role(required) => {
                    log::warn!(
                        "User {} denied {} {}: {} role required",
                        principal.user_id,
                        req.method(),
                        req.path(),
                        required.as_str()
                    );
                    Ok(req.error_response(AppError::Forbidden(format!(
                        "{} role required",
                        required.as_str()
                    ))))
                }
                Some(_) => srv.call(req).await.map(|res| res.map_into_boxed_body()),
            }
        })
    }
}

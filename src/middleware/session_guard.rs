use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::{ErrorForbidden, ErrorInternalServerError, ErrorUnauthorized},
    web, Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::models::Role;
use crate::services::session_service;
use crate::store::RecordStore;

/// Centralized access gate for protected scopes. Loads the persisted session,
/// optionally enforces a required role, and injects the `Session` into
/// request extensions for handlers to consume via `ReqData`.
pub struct SessionGuard {
    required: Option<Role>,
}

impl SessionGuard {
    /// Any authenticated session.
    pub fn authenticated() -> Self {
        Self { required: None }
    }

    pub fn student() -> Self {
        Self {
            required: Some(Role::Student),
        }
    }

    pub fn teacher() -> Self {
        Self {
            required: Some(Role::Teacher),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGuardMiddleware {
            service: Rc::new(service),
            required: self.required,
        }))
    }
}

pub struct SessionGuardMiddleware<S> {
    service: Rc<S>,
    required: Option<Role>,
}

impl<S, B> Service<ServiceRequest> for SessionGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let required = self.required;

        Box::pin(async move {
            let store = match req.app_data::<web::Data<dyn RecordStore>>() {
                Some(store) => store.clone(),
                None => return Err(ErrorInternalServerError("Record store not configured")),
            };

            let session = match session_service::current_session(store.get_ref()).await {
                Some(session) => session,
                None => return Err(ErrorUnauthorized("Not authenticated")),
            };

            if let Some(role) = required {
                if session.role != role {
                    return Err(ErrorForbidden(format!("Requires {} role", role)));
                }
            }

            req.extensions_mut().insert(session);
            service.call(req).await
        })
    }
}

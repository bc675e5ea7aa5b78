//! Session gate middleware
//!
//! Resolves the caller's `Identity` from the session cookie and applies the
//! path policy of `AccessGate`. Anonymous requests to non-public paths are
//! answered here with the login view; everything else reaches the handler
//! with the identity stored in request extensions.

use actix_service::{Service, Transform};
use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{Payload, ServiceRequest, ServiceResponse},
    http::header::ContentType,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::{debug, info, trace};

use crate::api::views;
use crate::runtime::AppState;
use crate::services::{GateDecision, Identity, LOGIN_REQUIRED_MESSAGE};

#[derive(Clone, Default)]
pub struct SessionGate;

impl<S, B> Transform<S, ServiceRequest> for SessionGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionGateMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct SessionGateMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> SessionGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    /// cookie → token → user。任何一步失败都视为匿名
    fn resolve_identity(req: &ServiceRequest, state: &AppState) -> Identity {
        let Some(cookie) = req.cookie(state.cookies.name()) else {
            return Identity::Anonymous;
        };

        let claims = match state.sessions.validate(cookie.value()) {
            Ok(claims) => claims,
            Err(e) => {
                debug!("Session token rejected: {}", e);
                return Identity::Anonymous;
            }
        };

        match state.auth.resolve(&claims.sub) {
            Some(user) => {
                trace!("Session resolved to user '{}'", user.id);
                Identity::Authenticated(user)
            }
            None => {
                debug!("Session points at unknown user '{}'", claims.sub);
                Identity::Anonymous
            }
        }
    }

    fn handle_login_required(req: ServiceRequest) -> ServiceResponse<EitherBody<B>> {
        info!("Anonymous request to {} turned away", req.path());
        req.into_response(
            HttpResponse::Unauthorized()
                .content_type(ContentType::html())
                .body(views::render_login(None, Some(LOGIN_REQUIRED_MESSAGE)))
                .map_into_right_body(),
        )
    }
}

impl<S, B> Service<ServiceRequest> for SessionGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                return Err(actix_web::error::ErrorInternalServerError(
                    "application state not configured",
                ));
            };

            let identity = Self::resolve_identity(&req, &state);

            match state.gate.check(&identity, req.path()) {
                GateDecision::Allow => {
                    req.extensions_mut().insert(identity);
                    let response = srv.call(req).await?.map_into_left_body();
                    Ok(response)
                }
                GateDecision::RequireLogin => Ok(Self::handle_login_required(req)),
            }
        })
    }
}

/// 从 extensions 取出中间件解析好的身份，没有则视为匿名
impl FromRequest for Identity {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(req.extensions().get::<Identity>().cloned().unwrap_or_default()))
    }
}

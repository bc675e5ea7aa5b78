//! Login, registration and logout
//!
//! 登录与注册成功后签发会话 token 写入 cookie，并跳转到 /urls。

use actix_web::http::StatusCode;
use actix_web::http::header::LOCATION;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::{error, info};

use super::{html, see_other};
use crate::api::views;
use crate::errors::TinyAppError;
use crate::runtime::AppState;
use crate::services::Identity;
use crate::storage::User;

#[derive(Debug, Default, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub struct AuthHandlers;

impl AuthHandlers {
    pub async fn login_page(identity: Identity) -> HttpResponse {
        html(StatusCode::OK, views::render_login(identity.user(), None))
    }

    pub async fn register_page(identity: Identity) -> HttpResponse {
        html(
            StatusCode::OK,
            views::render_registration(identity.user(), None),
        )
    }

    pub async fn login(
        state: web::Data<AppState>,
        identity: Identity,
        form: web::Form<CredentialsForm>,
    ) -> Result<HttpResponse, TinyAppError> {
        match state.auth.login(&form.email, &form.password) {
            Ok(user) => Self::start_session(&state, &user),
            Err(err @ TinyAppError::InvalidCredentials(_)) => Ok(html(
                err.http_status(),
                views::render_login(identity.user(), Some(err.message())),
            )),
            Err(err) => Err(err),
        }
    }

    pub async fn register(
        state: web::Data<AppState>,
        identity: Identity,
        form: web::Form<CredentialsForm>,
    ) -> Result<HttpResponse, TinyAppError> {
        match state.auth.register(&form.email, &form.password) {
            Ok(user) => Self::start_session(&state, &user),
            Err(err @ (TinyAppError::Validation(_) | TinyAppError::EmailTaken(_))) => Ok(html(
                err.http_status(),
                views::render_registration(identity.user(), Some(err.message())),
            )),
            Err(err) => Err(err),
        }
    }

    pub async fn logout(state: web::Data<AppState>, identity: Identity) -> HttpResponse {
        if let Some(user_id) = identity.user_id() {
            info!("User '{}' logged out", user_id);
        }

        let mut response = see_other("/login");
        // removal cookie 只在名字和路径一致时生效
        if let Err(e) = response.add_cookie(&state.cookies.removal()) {
            error!("Failed to attach session removal cookie: {}", e);
        }
        response
    }

    fn start_session(state: &AppState, user: &User) -> Result<HttpResponse, TinyAppError> {
        let token = state.sessions.issue(&user.id)?;

        Ok(HttpResponse::Found()
            .insert_header((LOCATION, "/urls"))
            .cookie(state.cookies.build(token))
            .finish())
    }
}

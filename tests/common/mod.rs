//! Shared helpers for HTTP-level tests

#![allow(dead_code)]

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::LOCATION;

use tinyapp::config::StaticConfig;
use tinyapp::runtime::{AppState, prepare};

/// Seeded state with raw credentials so tests do not pay for argon2
pub fn test_state() -> AppState {
    let mut config = StaticConfig::default();
    config.auth.hash_passwords = false;
    config.session.secret = "integration-test-secret-0123456789".to_string();
    prepare(&config).expect("Failed to prepare state")
}

pub fn hashed_state() -> AppState {
    let mut config = StaticConfig::default();
    config.session.secret = "integration-test-secret-0123456789".to_string();
    prepare(&config).expect("Failed to prepare state")
}

pub fn session_cookie<B>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "session")
        .map(|c| c.into_owned())
}

pub fn location<B>(resp: &ServiceResponse<B>) -> Option<String> {
    resp.headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Create a test app with the full route table behind the session gate
macro_rules! tiny_app {
    ($state:expr) => {{
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .wrap(tinyapp::api::middleware::SessionGate)
                .configure(tinyapp::api::configure_routes),
        )
        .await
    }};
}

/// POST a form and return the response
macro_rules! post_form {
    ($app:expr, $uri:expr, $form:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri($uri)
            .set_form($form)
            .to_request();
        actix_web::test::call_service(&$app, req).await
    }};
    ($app:expr, $uri:expr, $form:expr, $cookie:expr) => {{
        let req = actix_web::test::TestRequest::post()
            .uri($uri)
            .cookie($cookie.clone())
            .set_form($form)
            .to_request();
        actix_web::test::call_service(&$app, req).await
    }};
}

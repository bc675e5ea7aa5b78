//! Route table
//!
//! Shared by the server and the integration tests. `/urls/new` must be
//! registered before `/urls/{short_code}`.

use actix_web::{HttpResponse, web};

use super::services::{AuthHandlers, RedirectHandler, UrlHandlers, not_found};
use crate::services::Identity;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(UrlHandlers::root))
        .route("/login", web::get().to(AuthHandlers::login_page))
        .route("/login", web::post().to(AuthHandlers::login))
        .route("/register", web::get().to(AuthHandlers::register_page))
        .route("/register", web::post().to(AuthHandlers::register))
        .route("/logout", web::post().to(AuthHandlers::logout))
        .service(
            web::scope("/urls")
                .route("", web::get().to(UrlHandlers::index))
                .route("", web::post().to(UrlHandlers::create))
                .route("/new", web::get().to(UrlHandlers::new_form))
                .route("/{short_code}", web::get().to(UrlHandlers::show))
                .route("/{short_code}/edit", web::post().to(UrlHandlers::edit))
                .route("/{short_code}/delete", web::post().to(UrlHandlers::delete)),
        )
        .route("/u/{short_code}", web::get().to(RedirectHandler::follow))
        .default_service(web::to(fallback));
}

async fn fallback(identity: Identity) -> HttpResponse {
    not_found(&identity, "Page not found")
}

//! Request handlers
//!
//! Handlers return `Result<HttpResponse, TinyAppError>`. Expected outcomes
//! (login required, missing entry) are turned into HTML views here; anything
//! else falls through to `TinyAppError`'s `ResponseError` impl.

pub mod auth;
pub mod redirect;
pub mod urls;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::{ContentType, LOCATION};

use crate::api::views;
use crate::errors::TinyAppError;
use crate::services::{Identity, LOGIN_REQUIRED_MESSAGE};

pub use auth::AuthHandlers;
pub use redirect::RedirectHandler;
pub use urls::UrlHandlers;

/// 构建 HTML 响应
pub fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body)
}

/// 302 Found
///
/// The location is percent-encoded first, so stored targets with spaces,
/// control characters or non-ASCII text still make a valid header.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((LOCATION, encode_location(location)))
        .finish()
}

/// Percent-encode everything that may not appear raw in a URL. Characters
/// that are already legal and existing `%XX` escapes are left untouched.
pub fn encode_location(location: &str) -> String {
    let mut encoded = String::with_capacity(location.len());
    let mut buf = [0u8; 4];

    for (i, c) in location.char_indices() {
        let keep = match c {
            '%' => location
                .as_bytes()
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)),
            '!' | '#'..=';' | '=' | '?'..='_' | 'a'..='z' | '|' | '~' => true,
            _ => false,
        };

        if keep {
            encoded.push(c);
        } else {
            encoded.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
        }
    }

    encoded
}

pub fn login_required() -> HttpResponse {
    html(
        StatusCode::UNAUTHORIZED,
        views::render_login(None, Some(LOGIN_REQUIRED_MESSAGE)),
    )
}

pub fn not_found(identity: &Identity, message: &str) -> HttpResponse {
    html(
        StatusCode::NOT_FOUND,
        views::render_not_found(identity.user(), message),
    )
}

/// AccessDenied → 登录页，NotFound → 404 页，其余错误交给 ResponseError
pub fn view_for_failure(
    identity: &Identity,
    err: TinyAppError,
) -> Result<HttpResponse, TinyAppError> {
    match err {
        TinyAppError::AccessDenied(_) => Ok(login_required()),
        TinyAppError::NotFound(msg) => Ok(not_found(identity, &msg)),
        other => Err(other),
    }
}

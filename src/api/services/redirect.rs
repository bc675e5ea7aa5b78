//! Public redirect (`GET /u/{short_code}`)

use actix_web::{HttpResponse, web};
use tracing::{debug, trace};

use super::{not_found, see_other};
use crate::runtime::AppState;
use crate::services::Identity;
use crate::utils::is_valid_short_code;

pub struct RedirectHandler;

impl RedirectHandler {
    pub async fn follow(
        state: web::Data<AppState>,
        identity: Identity,
        path: web::Path<String>,
    ) -> HttpResponse {
        let short_code = path.into_inner();

        if !is_valid_short_code(&short_code) {
            // 非法短码，直接 404
            trace!("Invalid short code rejected: {}", short_code);
            return Self::not_found_response(&identity, &short_code);
        }

        match state.urls.resolve_target(&short_code) {
            Ok(target) => {
                debug!("Redirecting '{}' -> '{}'", short_code, target);
                see_other(&target)
            }
            Err(_) => Self::not_found_response(&identity, &short_code),
        }
    }

    fn not_found_response(identity: &Identity, short_code: &str) -> HttpResponse {
        not_found(
            identity,
            &format!("Short URL '{}' does not exist", short_code),
        )
    }
}

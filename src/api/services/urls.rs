//! Short URL management handlers (`/urls/...`)
//!
//! The session gate already keeps anonymous callers out of these paths, so
//! the only per-entry decision left here is ownership.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::{info, trace};

use super::{html, not_found, see_other, view_for_failure};
use crate::api::views;
use crate::errors::TinyAppError;
use crate::runtime::AppState;
use crate::services::Identity;
use crate::utils::is_valid_short_code;

#[derive(Debug, Default, Deserialize)]
pub struct TargetForm {
    #[serde(rename = "longURL", alias = "targetUrl", default)]
    pub target_url: String,
}

pub struct UrlHandlers;

impl UrlHandlers {
    pub async fn root() -> HttpResponse {
        see_other("/urls")
    }

    pub async fn index(state: web::Data<AppState>, identity: Identity) -> HttpResponse {
        let urls = state.urls.list_for(&identity);
        trace!("Listing {} urls for {:?}", urls.len(), identity.user_id());
        html(
            StatusCode::OK,
            views::render_urls_index(identity.user(), &urls),
        )
    }

    pub async fn new_form(identity: Identity) -> HttpResponse {
        html(StatusCode::OK, views::render_urls_new(identity.user()))
    }

    pub async fn create(
        state: web::Data<AppState>,
        identity: Identity,
        form: web::Form<TargetForm>,
    ) -> Result<HttpResponse, TinyAppError> {
        match state.urls.create_for(&identity, &form.target_url) {
            Ok(entry) => {
                info!(
                    "Created short URL '{}' -> '{}'",
                    entry.short_code, entry.target_url
                );
                Ok(see_other(&format!("/urls/{}", entry.short_code)))
            }
            Err(err) => view_for_failure(&identity, err),
        }
    }

    pub async fn show(
        state: web::Data<AppState>,
        identity: Identity,
        path: web::Path<String>,
    ) -> Result<HttpResponse, TinyAppError> {
        let short_code = path.into_inner();
        if !is_valid_short_code(&short_code) {
            return Ok(Self::missing(&identity, &short_code));
        }

        match state.urls.get_owned(&identity, &short_code) {
            Ok(entry) => Ok(html(
                StatusCode::OK,
                views::render_urls_show(identity.user(), &entry.short_code, &entry.target_url),
            )),
            Err(err) => view_for_failure(&identity, err),
        }
    }

    pub async fn edit(
        state: web::Data<AppState>,
        identity: Identity,
        path: web::Path<String>,
        form: web::Form<TargetForm>,
    ) -> Result<HttpResponse, TinyAppError> {
        let short_code = path.into_inner();
        if !is_valid_short_code(&short_code) {
            return Ok(Self::missing(&identity, &short_code));
        }

        match state
            .urls
            .update_owned(&identity, &short_code, &form.target_url)
        {
            Ok(entry) => {
                info!(
                    "Updated short URL '{}' -> '{}'",
                    entry.short_code, entry.target_url
                );
                Ok(see_other("/urls"))
            }
            Err(err) => view_for_failure(&identity, err),
        }
    }

    pub async fn delete(
        state: web::Data<AppState>,
        identity: Identity,
        path: web::Path<String>,
    ) -> Result<HttpResponse, TinyAppError> {
        let short_code = path.into_inner();

        match state.urls.delete_owned(&identity, &short_code) {
            Ok(Some(entry)) => {
                info!("Deleted short URL '{}'", entry.short_code);
                Ok(see_other("/urls"))
            }
            Ok(None) => Ok(see_other("/urls")),
            Err(err) => view_for_failure(&identity, err),
        }
    }

    fn missing(identity: &Identity, short_code: &str) -> HttpResponse {
        not_found(
            identity,
            &format!("Short URL '{}' does not exist", short_code),
        )
    }
}

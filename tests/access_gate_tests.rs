//! Access gate behaviour over HTTP: anonymous visitors, forged sessions and
//! ownership violations.

#[macro_use]
mod common;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};

use common::{session_cookie, test_state};

const LOGIN_REQUIRED: &str = "Please login or register to Tiny App to access this page!";

#[tokio::test]
async fn test_anonymous_gets_login_view_on_protected_paths() {
    let app = tiny_app!(test_state());

    for uri in ["/", "/urls", "/urls/new", "/urls/b2xVn2", "/nowhere"] {
        let req = TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "uri {}", uri);
        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains(LOGIN_REQUIRED), "uri {}", uri);
    }
}

#[tokio::test]
async fn test_anonymous_post_is_turned_away_without_side_effects() {
    let state = test_state();
    let urls = state.urls.clone();
    let app = tiny_app!(state);

    let resp = post_form!(app, "/urls", &[("longURL", "http://evil.com")]);
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = post_form!(app, "/urls/b2xVn2/delete", &[("x", "y")]);
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    assert_eq!(urls.directory().len(), 2);
    assert!(urls.directory().get("b2xVn2").is_some());
}

#[tokio::test]
async fn test_anonymous_allowed_on_public_paths() {
    let app = tiny_app!(test_state());

    for uri in ["/login", "/register"] {
        let req = TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "uri {}", uri);
    }

    let req = TestRequest::get().uri("/u/b2xVn2").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
}

#[tokio::test]
async fn test_forged_cookie_is_anonymous() {
    let app = tiny_app!(test_state());

    let req = TestRequest::get()
        .uri("/urls")
        .cookie(Cookie::new("session", "not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cookie_for_unknown_user_is_anonymous() {
    let state = test_state();
    let token = state.sessions.issue("ghostUser").unwrap();
    let app = tiny_app!(state);

    let req = TestRequest::get()
        .uri("/urls")
        .cookie(Cookie::new("session", token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_other_users_entry_looks_like_login_required() {
    let state = test_state();
    let urls = state.urls.clone();
    let app = tiny_app!(state);

    // user2 登录后尝试访问 user 的 b2xVn2
    let resp = post_form!(
        app,
        "/login",
        &[("email", "user2@example.com"), ("password", "dishwasher-funk")]
    );
    let cookie = session_cookie(&resp).unwrap();

    let req = TestRequest::get()
        .uri("/urls/b2xVn2")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains(LOGIN_REQUIRED));
    assert!(!body.contains("lighthouselabs"));

    let resp = post_form!(
        app,
        "/urls/b2xVn2/edit",
        &[("longURL", "http://evil.com")],
        cookie
    );
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = post_form!(app, "/urls/b2xVn2/delete", &[("x", "y")], cookie);
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let entry = urls.directory().get("b2xVn2").unwrap();
    assert_eq!(entry.target_url, "http://www.lighthouselabs.ca");
}

#[tokio::test]
async fn test_listing_only_shows_own_entries() {
    let app = tiny_app!(test_state());

    let resp = post_form!(
        app,
        "/login",
        &[("email", "user@example.com"), ("password", "purple-monkey-dinosaur")]
    );
    let cookie = session_cookie(&resp).unwrap();

    let req = TestRequest::get().uri("/urls").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.contains("b2xVn2"));
    assert!(!body.contains("9sm5xK"));
}
